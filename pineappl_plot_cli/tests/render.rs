#![allow(missing_docs)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const DOUBLE_DIFFERENTIAL: &str = r"
xaxis: x2
metadata:
  description: Drell-Yan double-differential distribution
  x1_label_tex: $y_{\ell\ell}$
  x2_label_tex: $M_{\ell\ell}$
  x2_unit: GeV
  y_label_tex: $\frac{\mathrm{d}^2\sigma}{\mathrm{d}y_{\ell\ell}\mathrm{d}M_{\ell\ell}}$
  y_unit: pb/GeV
bins:
  left: [[0.0, 0.0, 1.0, 1.0], [10.0, 20.0, 10.0, 20.0]]
  right: [[1.0, 1.0, 2.0, 2.0], [20.0, 40.0, 20.0, 40.0]]
  min: [9.0, 4.5, 7.2, 3.6]
  max: [11.0, 5.5, 8.8, 4.4]
  qcd_central: [9.5, 4.8, 7.6, 3.8]
  qcd_min: [8.6, 4.3, 6.8, 3.4]
  qcd_max: [10.4, 5.3, 8.4, 4.2]
  pdf_results:
    - label: NNPDF40_nnlo_as_01180
      y: [10.0, 5.0, 8.0, 4.0]
      ymin: [9.8, 4.9, 7.8, 3.9]
      ymax: [10.2, 5.1, 8.2, 4.1]
    - label: CT18NNLO=CT18
      y: [10.4, 5.1, 8.1, 4.2]
      ymin: [10.0, 4.9, 7.8, 4.0]
      ymax: [10.8, 5.3, 8.4, 4.4]
";

const INTEGRATED: &str = r"
metadata:
  description: inclusive cross section
  x1_label_tex: $\sqrt{s}$
  y_label_tex: $\sigma$
  y_unit: pb
slices:
  - x: [0.0, 10.0]
    y: [5.0, 5.0]
    ymin: [4.5, 4.5]
    ymax: [5.5, 5.5]
    qcd_y: [4.9, 4.9]
    qcd_min: [4.4, 4.4]
    qcd_max: [5.4, 5.4]
    pdf_results:
      - label: CENTRAL-PDF
        y: [5.0, 5.0]
        ymin: [4.8, 4.8]
        ymax: [5.2, 5.2]
    mid: [5.0]
";

const MISSING_UNIT: &str = r"
metadata:
  description: inclusive cross section
  x1_label_tex: $\sqrt{s}$
  y_label_tex: $\sigma$
slices:
  - x: [0.0, 10.0]
    y: [5.0, 5.0]
    ymin: [4.5, 4.5]
    ymax: [5.5, 5.5]
    qcd_y: [4.9, 4.9]
    qcd_min: [4.4, 4.4]
    qcd_max: [5.4, 5.4]
    pdf_results:
      - label: CENTRAL-PDF
        y: [5.0, 5.0]
        ymin: [4.8, 4.8]
        ymax: [5.2, 5.2]
    mid: [5.0]
";

#[test]
fn help() {
    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Usage: pineappl-plot render [OPTIONS] <INPUT>")
                .and(predicate::str::contains("[possible values: svg, matplotlib]"))
                .and(predicate::str::contains(
                    "Number of threads rendering slices in parallel [default: 1]",
                )),
        );
}

#[test]
fn one_artifact_per_slice() {
    let temp = TempDir::new().unwrap();
    temp.child("dy.yaml").write_str(DOUBLE_DIFFERENTIAL).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["render", "--threads=2", "dy.yaml"])
        .assert()
        .success()
        .stdout("dy-0.svg\ndy-1.svg\n");

    for name in ["dy-0.svg", "dy-1.svg"] {
        temp.child(name).assert(
            predicate::str::starts_with("<svg")
                .and(predicate::str::contains("Drell-Yan double-differential distribution"))
                .and(predicate::str::ends_with("</svg>\n")),
        );
    }

    temp.child("dy.svg").assert(predicate::path::missing());
}

#[test]
fn single_slice_keeps_output_name() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(INTEGRATED).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["render", "--output", "figure", "xs.yaml"])
        .assert()
        .success()
        .stdout("figure.svg\n");

    temp.child("figure.svg").assert(predicate::path::exists());
    temp.child("figure-0.svg").assert(predicate::path::missing());
}

#[test]
fn matplotlib_script() {
    let temp = TempDir::new().unwrap();
    temp.child("dy.yaml").write_str(DOUBLE_DIFFERENTIAL).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args([
            "--no-tex",
            "render",
            "--format=matplotlib",
            "--threads=1",
            "dy.yaml",
        ])
        .assert()
        .success()
        .stdout("dy-0.py\ndy-1.py\n");

    temp.child("dy-0.py").assert(
        predicate::str::starts_with("#!/usr/bin/env python3\n")
            .and(predicate::str::contains("plt.rc('text', usetex=False)"))
            .and(predicate::str::contains("set_xscale('log')"))
            .and(predicate::str::ends_with(
                "fig.savefig(r'dy-0.pdf')\nplt.close(fig)\n",
            )),
    );
}

#[test]
fn compressed_svg() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(INTEGRATED).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["--compression=6", "render", "xs.yaml"])
        .assert()
        .success()
        .stdout("xs.svgz\n");

    temp.child("xs.svgz").assert(predicate::path::is_file());
}

#[test]
fn missing_metadata_writes_nothing() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(MISSING_UNIT).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["render", "xs.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("metadata key `y_unit` is missing"));

    temp.child("xs.svg").assert(predicate::path::missing());
}

#[test]
fn style_file() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(INTEGRATED).unwrap();
    temp.child("style.yaml")
        .write_str("use_tex: false\nfont_family: sans-serif\nfont_size: 10.0\n")
        .unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["--style", "style.yaml", "render", "--format=matplotlib", "xs.yaml"])
        .assert()
        .success();

    temp.child("xs.py").assert(predicate::str::contains(
        "plt.rc('font', family=r'sans-serif', size=10)",
    ));
}

#[test]
fn unknown_style_field() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(INTEGRATED).unwrap();
    temp.child("style.yaml").write_str("font_weight: bold\n").unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["--style", "style.yaml", "render", "xs.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read style 'style.yaml'"));
}

#[test]
fn unwritable_output_is_reported() {
    let temp = TempDir::new().unwrap();
    temp.child("xs.yaml").write_str(INTEGRATED).unwrap();

    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .current_dir(temp.path())
        .args(["render", "--output", "missing/figure", "xs.yaml"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("could not access `missing/figure.svg`"));

    temp.child("missing").assert(predicate::path::missing());
}
