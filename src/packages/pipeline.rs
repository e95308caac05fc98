//! Package scan pipeline: scan, assemble, render, write

use crate::config::PackagesConfig;
use crate::packages::render::{render_dockerfile_includes, render_install_script};
use crate::packages::scan::{assemble_packages, scan_documents};
use crate::structs::{PackagesSummary, Result};
use std::fs;

pub const DOCKERFILE_INCLUDES: &str = "dockerfile_includes";
pub const INSTALL_SCRIPT: &str = "package_installs.R";

/// Scan documents and write both install artifacts into the output directory
///
/// # Errors
/// Returns error if scanning fails or an artifact cannot be written
pub fn build_package_scripts(config: &PackagesConfig) -> Result<PackagesSummary> {
    let scan = scan_documents(&config.source_dir, &config.extension)?;
    let packages = assemble_packages(&scan.packages, config);
    tracing::info!("{} unique packages after adjustments", packages.len());

    fs::create_dir_all(&config.output_dir)?;

    let dockerfile_includes = config.output_dir.join(DOCKERFILE_INCLUDES);
    fs::write(&dockerfile_includes, render_dockerfile_includes(&packages))?;

    let install_script = config.output_dir.join(INSTALL_SCRIPT);
    tracing::info!("writing to {}", install_script.display());
    fs::write(&install_script, render_install_script(&packages, config))?;

    Ok(PackagesSummary {
        documents: scan.documents.len(),
        packages,
        dockerfile_includes,
        install_script,
    })
}
