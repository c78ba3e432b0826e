use radar_core::BrandRegistry;

/// Print the configured brands as a table.
pub(crate) fn run_brands(registry: &BrandRegistry) {
    let rows = brand_rows(registry);
    if rows.is_empty() {
        println!("no brands configured; add them to the brand registry file");
        return;
    }

    println!("{:<20}{:<16}{:<6}COMPETITORS", "BRAND", "INDUSTRY", "LANG");
    for row in rows {
        println!("{row}");
    }
}

fn brand_rows(registry: &BrandRegistry) -> Vec<String> {
    registry
        .brand_names()
        .into_iter()
        .map(|name| {
            format!(
                "{:<20}{:<16}{:<6}{}",
                name,
                registry.industry(name).unwrap_or("-"),
                registry.language(name),
                registry.competitors(name).len()
            )
        })
        .collect()
}
