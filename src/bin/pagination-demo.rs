//! Demo: add pagination links and metadata to OPDS catalogs.
//!
//! Walks the three interesting cases: first page, middle page, and last
//! page, showing which navigational relations each one carries.

use opds2::{add_pagination, Catalog, Link, Metadata, Pagination, Publication};

fn sample_publications() -> Vec<Publication> {
    (1..=10)
        .map(|i| Publication {
            metadata: Metadata::new(format!("Book {i}")),
            links: vec![Link::new(format!("https://example.com/book{i}.epub"))
                .with_type("application/epub+zip")],
            images: None,
        })
        .collect()
}

fn print_catalog(label: &str, catalog: &Catalog) {
    println!("{}", "=".repeat(80));
    println!("DEMO: {label}");
    println!("{}", "=".repeat(80));
    println!("Catalog Title: {}", catalog.metadata.title);
    println!("Total Items: {:?}", catalog.metadata.number_of_items);
    println!("Items Per Page: {:?}", catalog.metadata.items_per_page);
    println!("Current Page: {:?}", catalog.metadata.current_page);
    println!("Pagination Links:");
    for link in &catalog.links {
        println!("  {}: {}", link.rel.as_deref().unwrap_or("-"), link.href);
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    // Page 1 of 10: no previous link.
    let mut catalog = Catalog::builder()
        .title("My Library Catalog")
        .publications(sample_publications())
        .self_link("https://example.com/catalog")
        .build()?;
    add_pagination(
        &mut catalog,
        &Pagination {
            total: 100,
            limit: 10,
            offset: 0,
            base_url: "https://example.com/catalog".to_string(),
            params: vec![("sort".to_string(), "title".to_string())],
        },
    );
    print_catalog("Basic Pagination (page 1)", &catalog);

    // Page 5 of 10: all five relations.
    let mut catalog = Catalog::builder().title("Search Results").build()?;
    add_pagination(
        &mut catalog,
        &Pagination {
            total: 100,
            limit: 10,
            offset: 40,
            base_url: "https://example.com/search".to_string(),
            params: vec![
                ("query".to_string(), "python".to_string()),
                ("sort".to_string(), "relevance".to_string()),
            ],
        },
    );
    print_catalog("Middle Page Pagination (page 5)", &catalog);

    // Page 10 of 10: no next or last link.
    let mut catalog = Catalog::builder().title("Search Results").build()?;
    add_pagination(
        &mut catalog,
        &Pagination {
            total: 100,
            limit: 10,
            offset: 90,
            base_url: "https://example.com/search".to_string(),
            params: vec![("query".to_string(), "python".to_string())],
        },
    );
    print_catalog("Last Page Pagination (page 10)", &catalog);

    println!("Serialized page-1 document:");
    let mut catalog = Catalog::builder()
        .title("My Library Catalog")
        .publications(sample_publications())
        .build()?;
    add_pagination(
        &mut catalog,
        &Pagination {
            total: 100,
            limit: 10,
            offset: 0,
            base_url: "https://example.com/catalog".to_string(),
            params: Vec::new(),
        },
    );
    println!("{}", catalog.to_json_pretty()?);

    Ok(())
}
