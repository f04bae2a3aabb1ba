use i18n_export::ExportReport;

/// Print how each language's table was assembled.
pub fn print_stats(report: &ExportReport) {
    println!("=== Stats ===");
    let codes: Vec<String> = report
        .document
        .languages()
        .map(|lang| lang.to_string())
        .collect();
    println!("Languages: {} ({})", codes.len(), codes.join(", "));

    for (lang, stats) in &report.languages {
        let percent = if stats.total == 0 {
            100.0
        } else {
            (stats.native as f64) * 100.0 / (stats.total as f64)
        };
        println!("\nLanguage: {}", lang);
        println!("  Total: {}", stats.total);
        println!("  Native: {}", stats.native);
        println!("  English fallback: {}", stats.fallback);
        println!("  Manual: {}", stats.manual);
        println!("  Native share: {:.2}%", percent);
    }
}
