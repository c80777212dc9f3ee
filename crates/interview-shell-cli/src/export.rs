use std::path::Path;

use interview_shell_engine::html::{DASHBOARD_FILE, dashboard_page, page_file_name, pattern_page};
use interview_shell_engine::{Pattern, PatternError, io};
use relative_path::{RelativePath, RelativePathBuf};

/// Writes the dashboard and one page per pattern under `out_dir`.
///
/// Returns the number of files written.
pub fn export_site(patterns: &[Pattern], out_dir: &Path) -> Result<usize, PatternError> {
    io::write_file(
        RelativePath::new(DASHBOARD_FILE),
        out_dir,
        &dashboard_page(patterns),
    )?;

    for pattern in patterns {
        let file = RelativePathBuf::from(page_file_name(pattern));
        io::write_file(&file, out_dir, &pattern_page(pattern))?;
        log::debug!("Exported {} to {file}", pattern.id);
    }

    let written = patterns.len() + 1;
    log::info!("Exported {written} pages to {}", out_dir.display());
    Ok(written)
}
