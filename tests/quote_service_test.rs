//! Integration tests for QuoteService: loading, rendering and quoting order documents.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use ordertree::application::services::QuoteService;
use ordertree::application::ApplicationError;
use ordertree::domain::{DomainError, RenderStyle};
use ordertree::infrastructure::traits::{FileSystem, RealFileSystem};

#[ctor::ctor]
fn init() {
    ordertree::util::testing::init_test_setup();
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/orders")
        .join(name)
}

fn real_service() -> QuoteService {
    QuoteService::new(Arc::new(RealFileSystem), RenderStyle::default())
}

/// In-memory filesystem keyed by path.
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from(path), content.to_string());
        Self { files }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not in memory"))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

// ============================================================
// quote
// ============================================================

#[test]
fn given_order_with_delivery_when_quoting_then_grand_total_adds_delivery() {
    let quote = real_service().quote(&fixture("ord-2024-001.toml")).unwrap();

    assert_eq!(quote.order_total, dec("70800"));
    let delivery = quote.delivery.expect("delivery quoted");
    assert_eq!(delivery.cost, dec("705.25"));
    assert!(delivery.description.starts_with("Courier delivery (15 km)"));
    assert_eq!(quote.grand_total, dec("71505.25"));
    assert!(quote.rendered.starts_with("Order #ORD-2024-001\nOrder contents:"));
    assert!(quote.rendered.ends_with("Total: 70800"));
}

#[test]
fn given_order_without_delivery_when_quoting_then_grand_total_equals_order_total() {
    let quote = real_service().quote(&fixture("ord-2024-002.toml")).unwrap();

    assert_eq!(quote.delivery, None);
    assert_eq!(quote.order_total, dec("550"));
    assert_eq!(quote.grand_total, quote.order_total);
}

#[test]
fn given_in_memory_document_when_quoting_then_uses_injected_filesystem() {
    let fs = MemoryFileSystem::with_file(
        "/orders/o-1.toml",
        r#"
number = "O-1"
components = [
    { type = "item", name = "P", price = 500 },
    { type = "group", name = "G2" },
]

[delivery]
method = "pickup"
point = "10 Lenin St"
"#,
    );
    let service = QuoteService::new(Arc::new(fs), RenderStyle::default());

    let quote = service.quote(Path::new("/orders/o-1.toml")).unwrap();

    assert_eq!(quote.order_total, dec("500"));
    assert_eq!(quote.grand_total, dec("500"));
    assert_eq!(
        quote.rendered,
        "Order #O-1\nOrder contents:\n  Item: P - 500\n  Group: G2 (total price: 0)\nTotal: 500"
    );
}

#[test]
fn given_parsed_document_when_quoting_in_memory_then_same_as_file_quote() {
    let path = fixture("ord-2024-001.toml");
    let content = std::fs::read_to_string(&path).unwrap();
    let document = QuoteService::parse(&content, &path).unwrap();
    let service = real_service();

    let from_document = service.quote_document(&document).unwrap();
    let from_file = service.quote(&path).unwrap();

    assert_eq!(from_document, from_file);
}

// ============================================================
// render
// ============================================================

#[test]
fn given_order_file_when_rendering_as_tree_then_box_drawing_labels() {
    let rendered = real_service()
        .render(&fixture("ord-2024-002.toml"), true)
        .unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Order #ORD-2024-002 (550)");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("Book - 500"));
    assert!(lines[2].ends_with("Pen - 50"));
}

#[test]
fn given_currency_style_when_rendering_then_prices_carry_suffix() {
    let style = RenderStyle {
        currency: Some("RUB".into()),
        ..RenderStyle::default()
    };
    let service = QuoteService::new(Arc::new(RealFileSystem), style);

    let rendered = service.render(&fixture("ord-2024-002.toml"), false).unwrap();

    assert!(rendered.contains("Item: Book - 500 RUB"));
    assert!(rendered.ends_with("Total: 550 RUB"));
}

// ============================================================
// errors
// ============================================================

#[test]
fn given_missing_file_when_loading_then_document_not_found() {
    let temp = TempDir::new().unwrap();

    let err = real_service()
        .load(&temp.path().join("absent.toml"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::DocumentNotFound(_)));
}

#[test]
fn given_directory_when_loading_then_document_not_found() {
    let temp = TempDir::new().unwrap();

    let err = real_service().load(temp.path()).unwrap_err();

    assert!(matches!(err, ApplicationError::DocumentNotFound(_)));
}

#[test]
fn given_unknown_component_type_when_loading_then_parse_error() {
    let err = real_service().load(&fixture("malformed.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { .. }));
}

#[test]
fn given_negative_price_when_loading_then_invalid_document() {
    let err = real_service()
        .load(&fixture("negative-price.toml"))
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidDocument { .. })
    ));
}

#[test]
fn given_document_written_to_tempdir_when_loading_then_tree_has_all_nodes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("order.toml");
    std::fs::write(
        &path,
        r#"
number = "ORD-2024-003"

[[components]]
type = "group"
name = "Outer box"
children = [
    { type = "item", name = "Large item", price = "1000" },
    { type = "group", name = "Inner box", children = [
        { type = "item", name = "Small item 1", price = "100" },
        { type = "item", name = "Small item 2", price = "200" },
    ] },
]
"#,
    )
    .unwrap();

    let loaded = real_service().load(&path).unwrap();

    assert_eq!(loaded.document.number, "ORD-2024-003");
    assert_eq!(loaded.tree.len(), 6);
    assert_eq!(loaded.tree.price(loaded.order).unwrap(), dec("1300"));
}
