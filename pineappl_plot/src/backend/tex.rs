//! Conversion of TeX labels into plain text for backends that can not typeset them.

use std::iter::Peekable;
use std::str::Chars;

fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "alpha" => "\u{3b1}",
        "beta" => "\u{3b2}",
        "gamma" => "\u{3b3}",
        "delta" => "\u{3b4}",
        "Delta" => "\u{394}",
        "epsilon" => "\u{3b5}",
        "eta" => "\u{3b7}",
        "theta" => "\u{3b8}",
        "lambda" => "\u{3bb}",
        "mu" => "\u{3bc}",
        "nu" => "\u{3bd}",
        "pi" => "\u{3c0}",
        "rho" => "\u{3c1}",
        "sigma" => "\u{3c3}",
        "tau" => "\u{3c4}",
        "phi" => "\u{3c6}",
        "chi" => "\u{3c7}",
        "omega" => "\u{3c9}",
        "ell" => "\u{2113}",
        "cdot" => "\u{b7}",
        "times" => "\u{d7}",
        "pm" => "\u{b1}",
        "to" | "rightarrow" => "\u{2192}",
        "lt" => "<",
        "gt" => ">",
        "leq" | "le" => "\u{2264}",
        "geq" | "ge" => "\u{2265}",
        // siunitx prefixes and units
        "tera" => "T",
        "giga" => "G",
        "mega" => "M",
        "kilo" => "k",
        "milli" => "m",
        "micro" => "\u{3bc}",
        "nano" => "n",
        "pico" => "p",
        "femto" => "f",
        "electronvolt" => "eV",
        "barn" => "b",
        "radian" => "rad",
        "percent" => "%",
        "per" => "/",
        _ => return None,
    })
}

fn group(chars: &mut Peekable<Chars<'_>>) -> String {
    while chars.next_if(|ch| ch.is_whitespace()).is_some() {}

    match chars.next() {
        Some('{') => {
            let mut depth = 0;
            let mut content = String::new();

            for ch in chars.by_ref() {
                match ch {
                    '{' => depth += 1,
                    '}' if depth == 0 => break,
                    '}' => depth -= 1,
                    _ => {}
                }
                content.push(ch);
            }

            content
        }
        Some('\\') => {
            let mut content = String::from('\\');
            while let Some(ch) = chars.next_if(char::is_ascii_alphabetic) {
                content.push(ch);
            }
            content
        }
        Some(ch) => ch.to_string(),
        None => String::new(),
    }
}

fn convert(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(ch) = chars.next() {
        match ch {
            '$' | '{' | '}' | '_' => {}
            '~' => out.push(' '),
            '\\' => {
                let mut name = String::new();
                while let Some(ch) = chars.next_if(char::is_ascii_alphabetic) {
                    name.push(ch);
                }

                if name.is_empty() {
                    match chars.next() {
                        Some('\\') => out.push_str("; "),
                        Some(',' | ';' | ' ') => out.push(' '),
                        Some(ch) => out.push(ch),
                        None => {}
                    }
                    continue;
                }

                match name.as_str() {
                    "frac" => {
                        let numerator = untex(&group(chars));
                        let denominator = untex(&group(chars));
                        out.push_str(&numerator);
                        out.push('/');
                        out.push_str(&denominator);
                    }
                    "si" | "mathrm" | "mathit" | "mathbf" | "text" | "textrm" | "bar"
                    | "overline" | "hat" | "tilde" => {
                        out.push_str(&untex(&group(chars)));
                    }
                    name => out.push_str(symbol(name).unwrap_or(name)),
                }
            }
            ch => out.push(ch),
        }
    }
}

/// Converts a TeX label into plain text: math shifts and braces are removed, fractions become
/// slashes, and Greek letters and `siunitx` units become their Unicode counterparts.
pub fn untex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    convert(&mut text.chars().peekable(), &mut out);
    out.replace("---", "\u{2014}").replace("--", "\u{2013}")
}
