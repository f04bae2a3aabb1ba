use i18n_export::{Document, Language};

/// Print the final table of one language.
pub fn print_view(document: &Document, lang: Language) {
    let Some(table) = document.get(lang) else {
        eprintln!("No strings found for language: {}", lang);
        return;
    };

    println!("\n=== {} ({} entries) ===", lang, table.len());
    for (id, value) in table.iter() {
        println!("  {}: {}", id, value);
    }
}
