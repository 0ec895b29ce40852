use anyhow::Result;

use opds2::{add_pagination, Catalog, Pagination};

fn catalog() -> Result<Catalog> {
    Ok(Catalog::builder().title("Search Results").build()?)
}

fn pagination(total: u64, limit: u32, offset: u64) -> Pagination {
    Pagination {
        total,
        limit,
        offset,
        base_url: "https://books.example.com/search".to_string(),
        params: vec![("query".to_string(), "rust".to_string())],
    }
}

fn hrefs(catalog: &Catalog) -> Vec<(String, String)> {
    catalog
        .links
        .iter()
        .map(|link| {
            (
                link.rel.clone().unwrap_or_default(),
                link.href.clone(),
            )
        })
        .collect()
}

#[test]
fn first_page_links() -> Result<()> {
    let mut catalog = catalog()?;
    add_pagination(&mut catalog, &pagination(100, 10, 0));

    assert_eq!(
        hrefs(&catalog),
        vec![
            (
                "self".to_string(),
                "https://books.example.com/search?query=rust".to_string()
            ),
            (
                "first".to_string(),
                "https://books.example.com/search?query=rust&page=1".to_string()
            ),
            (
                "next".to_string(),
                "https://books.example.com/search?query=rust&page=2".to_string()
            ),
            (
                "last".to_string(),
                "https://books.example.com/search?query=rust&page=10".to_string()
            ),
        ]
    );
    assert_eq!(catalog.metadata.number_of_items, Some(100));
    assert_eq!(catalog.metadata.items_per_page, Some(10));
    assert_eq!(catalog.metadata.current_page, Some(1));
    Ok(())
}

#[test]
fn middle_page_links() -> Result<()> {
    let mut catalog = catalog()?;
    add_pagination(&mut catalog, &pagination(100, 10, 40));

    let links = hrefs(&catalog);
    let rels: Vec<&str> = links.iter().map(|(rel, _)| rel.as_str()).collect();
    assert_eq!(rels, vec!["self", "first", "previous", "next", "last"]);
    assert!(links[0].1.ends_with("page=5"));
    assert!(links[2].1.ends_with("page=4"));
    assert!(links[3].1.ends_with("page=6"));
    assert!(links[4].1.ends_with("page=10"));
    assert_eq!(catalog.metadata.current_page, Some(5));
    Ok(())
}

#[test]
fn last_page_has_no_next_or_last() -> Result<()> {
    let mut catalog = catalog()?;
    add_pagination(&mut catalog, &pagination(100, 10, 90));

    let links = hrefs(&catalog);
    let rels: Vec<&str> = links.iter().map(|(rel, _)| rel.as_str()).collect();
    assert_eq!(rels, vec!["self", "first", "previous"]);
    assert!(links[0].1.ends_with("page=10"));
    assert!(links[2].1.ends_with("page=9"));
    assert_eq!(catalog.metadata.current_page, Some(10));
    Ok(())
}

#[test]
fn zero_limit_is_a_single_page() -> Result<()> {
    let mut catalog = catalog()?;
    add_pagination(&mut catalog, &pagination(500, 0, 0));

    let rels: Vec<String> = hrefs(&catalog).into_iter().map(|(rel, _)| rel).collect();
    assert_eq!(rels, vec!["self", "first"]);
    assert_eq!(catalog.metadata.current_page, Some(1));
    Ok(())
}

#[test]
fn caller_page_param_is_overridden() -> Result<()> {
    let mut catalog = catalog()?;
    let pagination = Pagination {
        total: 30,
        limit: 10,
        offset: 10,
        base_url: "https://books.example.com/search".to_string(),
        params: vec![
            ("query".to_string(), "science fiction".to_string()),
            ("page".to_string(), "999".to_string()),
        ],
    };
    add_pagination(&mut catalog, &pagination);

    let links = hrefs(&catalog);
    assert_eq!(
        links[0].1,
        "https://books.example.com/search?query=science+fiction&page=2"
    );
    assert!(links.iter().all(|(_, href)| !href.contains("999")));
    Ok(())
}
