use indicatif::ProgressStyle;

/// Progress bar style shared by scan and sweep commands.
pub fn scan_progress_style() -> ProgressStyle {
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}% ({elapsed})");
    match style {
        Ok(s) => s.progress_chars("#>-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}
