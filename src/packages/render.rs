//! Generated install artifacts

use crate::config::PackagesConfig;
use std::fmt::Write as _;

/// Quoted, line-continued list entries for a container build file
#[must_use]
pub fn render_dockerfile_includes(packages: &[String]) -> String {
    let mut content = String::new();
    for package in packages {
        let _ = writeln!(content, "\"{package}\", \\");
    }
    content
}

/// R script that installs every package not already available
#[must_use]
pub fn render_install_script(packages: &[String], config: &PackagesConfig) -> String {
    let mut content = String::new();

    for line in &config.preamble {
        let _ = writeln!(content, "{line}");
    }
    for package in packages {
        let _ = writeln!(
            content,
            "if (!require(\"{package}\")) install.packages(\"{package}\",repos=\"{}\",dependencies=TRUE)",
            config.cran_repo
        );
    }
    for line in &config.postamble {
        let _ = writeln!(content, "{line}");
    }

    content
}
