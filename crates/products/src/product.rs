use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use coop_core::{Entity, ProductId, ValidationErrors};

use crate::category::{Category, CategoryInput};
use crate::text::{name_key, normalize_title};

pub const PRODUCT_NAME_MAX_CHARS: usize = 100;
/// Inclusive upper bound for a price, checked after rounding.
pub const PRICE_MAX: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const STOCK_MAX: i64 = 10_000;
pub const CATEGORIES_MIN: usize = 1;
pub const CATEGORIES_MAX: usize = 10;

/// Raw product fields as submitted by a client (no id, no timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub categories: Vec<CategoryInput>,
    pub stock: i64,
}

/// The mutable part of a product, fully validated and normalized.
///
/// Holding a `ProductDetails` is proof that every field constraint was
/// checked: it can only be obtained through [`ProductDetails::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    name: String,
    price: Decimal,
    categories: Vec<Category>,
    stock: u32,
}

impl ProductDetails {
    /// Validate and normalize raw product input, reporting every violated
    /// constraint at once.
    pub fn parse(input: ProductInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = normalize_title(&input.name);
        let name_len = name.chars().count();
        if name_len == 0 {
            errors.add("name", "must not be empty");
        } else if name_len > PRODUCT_NAME_MAX_CHARS {
            errors.add(
                "name",
                format!("must be at most {PRODUCT_NAME_MAX_CHARS} characters"),
            );
        }

        let price = parse_price(input.price, &mut errors);
        let stock = parse_stock(input.stock, &mut errors);
        let categories = parse_categories(input.categories, &mut errors);

        errors.into_result(Self {
            name,
            price,
            categories,
            stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }
}

fn parse_price(raw: f64, errors: &mut ValidationErrors) -> Decimal {
    // Exact binary value of the float, so 2.675 (really 2.67499..) rounds down.
    let Some(price) = Decimal::from_f64_retain(raw) else {
        // Finite floats only miss `Decimal`'s range by being huge in magnitude.
        if !raw.is_finite() {
            errors.add("price", "must be a finite number");
        } else if raw.is_sign_negative() {
            errors.add("price", "must be greater than 0");
        } else {
            errors.add("price", format!("must not exceed {PRICE_MAX}"));
        }
        return Decimal::ZERO;
    };

    // Bounds apply to the rounded value: 10000.005 is accepted as 10000.00.
    let price = price.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    if price <= Decimal::ZERO {
        errors.add("price", "must be greater than 0");
    } else if price > PRICE_MAX {
        errors.add("price", format!("must not exceed {PRICE_MAX}"));
    }
    price
}

fn parse_stock(raw: i64, errors: &mut ValidationErrors) -> u32 {
    if raw < 0 {
        errors.add("stock", "must not be negative");
        return 0;
    }
    if raw > STOCK_MAX {
        errors.add("stock", format!("must not exceed {STOCK_MAX}"));
        return 0;
    }
    // 0..=STOCK_MAX always fits.
    raw as u32
}

fn parse_categories(raw: Vec<CategoryInput>, errors: &mut ValidationErrors) -> Vec<Category> {
    if raw.len() < CATEGORIES_MIN {
        errors.add("categories", "must have at least one category");
    } else if raw.len() > CATEGORIES_MAX {
        errors.add(
            "categories",
            format!("must not have more than {CATEGORIES_MAX} categories"),
        );
    }

    let mut categories: Vec<Category> = Vec::with_capacity(raw.len());
    for (index, input) in raw.into_iter().enumerate() {
        match Category::parse(input) {
            Ok(category) => {
                let key = name_key(category.name());
                if categories.iter().any(|c| name_key(c.name()) == key) {
                    errors.add(
                        "categories",
                        format!("duplicate category: {}", category.name()),
                    );
                } else {
                    categories.push(category);
                }
            }
            Err(nested) => errors.extend_nested(&format!("categories[{index}]"), nested),
        }
    }
    categories
}

/// A stored product record.
///
/// `id` and `created_at` are fixed at creation; everything else lives in
/// [`ProductDetails`] and is replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    details: ProductDetails,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, details: ProductDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        self.details.name()
    }

    pub fn price(&self) -> Decimal {
        self.details.price()
    }

    pub fn categories(&self) -> &[Category] {
        self.details.categories()
    }

    pub fn stock(&self) -> u32 {
        self.details.stock()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Full replacement of the mutable fields; `id` and `created_at` survive.
    pub fn replace_details(&mut self, details: ProductDetails) {
        self.details = details;
    }

    /// Whether any of this product's categories matches `name` after normalization.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories().iter().any(|c| c.matches_name(name))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> CategoryInput {
        CategoryInput::new("Frutas", Some("Productos frutales frescos"))
    }

    fn valid_input() -> ProductInput {
        ProductInput {
            name: "Manzana Roja".to_string(),
            price: 25.50,
            categories: vec![fruit()],
            stock: 100,
        }
    }

    fn parse_err(input: ProductInput) -> ValidationErrors {
        ProductDetails::parse(input).unwrap_err()
    }

    fn message_for(errors: &ValidationErrors, field: &str) -> String {
        errors
            .errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.clone())
            .unwrap_or_default()
    }

    #[test]
    fn valid_product_parses() {
        let details = ProductDetails::parse(valid_input()).unwrap();
        assert_eq!(details.name(), "Manzana Roja");
        assert_eq!(details.price(), Decimal::new(2550, 2));
        assert_eq!(details.categories().len(), 1);
        assert_eq!(details.stock(), 100);
    }

    #[test]
    fn name_is_trimmed_and_title_cased() {
        let input = ProductInput {
            name: "  papa CRIOLLA ".to_string(),
            ..valid_input()
        };
        assert_eq!(ProductDetails::parse(input).unwrap().name(), "Papa Criolla");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = parse_err(ProductInput {
            name: "   ".to_string(),
            ..valid_input()
        });
        assert_eq!(message_for(&err, "name"), "must not be empty");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let err = parse_err(ProductInput {
            name: "a".repeat(101),
            ..valid_input()
        });
        assert!(err.has_field("name"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = parse_err(ProductInput {
            price: -10.0,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "price"), "must be greater than 0");
    }

    #[test]
    fn zero_price_is_rejected() {
        let err = parse_err(ProductInput {
            price: 0.0,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "price"), "must be greater than 0");
    }

    #[test]
    fn price_that_rounds_to_zero_is_rejected() {
        let err = parse_err(ProductInput {
            price: 0.004,
            ..valid_input()
        });
        assert!(err.has_field("price"));
    }

    #[test]
    fn price_above_bound_is_rejected() {
        let err = parse_err(ProductInput {
            price: 15000.0,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "price"), "must not exceed 10000");

        let err = parse_err(ProductInput {
            price: 10000.01,
            ..valid_input()
        });
        assert!(err.has_field("price"));
    }

    #[test]
    fn price_is_bound_checked_after_rounding() {
        let details = ProductDetails::parse(ProductInput {
            price: 10000.005,
            ..valid_input()
        })
        .unwrap();
        assert_eq!(details.price(), Decimal::new(10_000, 0));
    }

    #[test]
    fn price_is_rounded_to_two_places() {
        let details = ProductDetails::parse(ProductInput {
            price: 19.999,
            ..valid_input()
        })
        .unwrap();
        assert_eq!(details.price(), Decimal::new(2000, 2));

        let details = ProductDetails::parse(ProductInput {
            price: 0.014,
            ..valid_input()
        })
        .unwrap();
        assert_eq!(details.price(), Decimal::new(1, 2));
    }

    #[test]
    fn prices_beyond_decimal_range_get_bound_messages() {
        let err = parse_err(ProductInput {
            price: 1e30,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "price"), "must not exceed 10000");

        let err = parse_err(ProductInput {
            price: -1e30,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "price"), "must be greater than 0");
    }

    #[test]
    fn rounding_uses_exact_float_value() {
        let details = ProductDetails::parse(ProductInput {
            price: 2.675,
            ..valid_input()
        })
        .unwrap();
        assert_eq!(details.price(), Decimal::new(267, 2));
    }

    #[test]
    fn stock_bounds() {
        let err = parse_err(ProductInput {
            stock: -5,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "stock"), "must not be negative");

        let err = parse_err(ProductInput {
            stock: 10_001,
            ..valid_input()
        });
        assert_eq!(message_for(&err, "stock"), "must not exceed 10000");

        for stock in [0, 10_000] {
            let details = ProductDetails::parse(ProductInput {
                stock,
                ..valid_input()
            })
            .unwrap();
            assert_eq!(i64::from(details.stock()), stock);
        }
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let err = parse_err(ProductInput {
            categories: vec![],
            ..valid_input()
        });
        assert_eq!(message_for(&err, "categories"), "must have at least one category");
    }

    #[test]
    fn more_than_ten_categories_is_rejected() {
        let categories = (0..11)
            .map(|i| CategoryInput::new(format!("Cat{}", char::from(b'a' + i)), None))
            .collect();
        let err = parse_err(ProductInput {
            categories,
            ..valid_input()
        });
        assert_eq!(
            message_for(&err, "categories"),
            "must not have more than 10 categories"
        );
    }

    #[test]
    fn ten_distinct_categories_are_accepted() {
        let categories = (0..10)
            .map(|i| CategoryInput::new(format!("Cat{}", char::from(b'a' + i)), None))
            .collect();
        let details = ProductDetails::parse(ProductInput {
            categories,
            ..valid_input()
        })
        .unwrap();
        assert_eq!(details.categories().len(), 10);
    }

    #[test]
    fn duplicate_categories_are_rejected_regardless_of_description() {
        let err = parse_err(ProductInput {
            categories: vec![
                CategoryInput::new("Frutas", Some("test1")),
                CategoryInput::new("Frutas", Some("test2")),
            ],
            ..valid_input()
        });
        assert_eq!(message_for(&err, "categories"), "duplicate category: Frutas");
    }

    #[test]
    fn duplicate_detection_uses_normalized_names() {
        let err = parse_err(ProductInput {
            categories: vec![
                CategoryInput::new("frutas", None),
                CategoryInput::new("  FRUTAS ", None),
            ],
            ..valid_input()
        });
        assert!(err.has_field("categories"));
    }

    #[test]
    fn nested_category_errors_carry_index() {
        let err = parse_err(ProductInput {
            categories: vec![fruit(), CategoryInput::new("", None)],
            ..valid_input()
        });
        assert_eq!(message_for(&err, "categories[1].name"), "must not be empty");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let err = parse_err(ProductInput {
            name: String::new(),
            price: -1.0,
            categories: vec![],
            stock: -1,
        });
        for field in ["name", "price", "categories", "stock"] {
            assert!(err.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn replace_details_keeps_identity_and_timestamp() {
        let id = ProductId::new();
        let created_at = Utc::now();
        let mut product = Product::new(id, ProductDetails::parse(valid_input()).unwrap(), created_at);

        let updated = ProductDetails::parse(ProductInput {
            name: "pera".to_string(),
            price: 12.0,
            categories: vec![CategoryInput::new("frutas de temporada", None)],
            stock: 3,
        })
        .unwrap();
        product.replace_details(updated);

        assert_eq!(product.id(), &id);
        assert_eq!(product.created_at(), created_at);
        assert_eq!(product.name(), "Pera");
        assert_eq!(product.stock(), 3);
        assert!(product.has_category("FRUTAS DE TEMPORADA"));
        assert!(!product.has_category("frutas"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: every input inside the declared bounds is accepted.
            #[test]
            fn valid_inputs_are_accepted(
                name in "[A-Za-z][A-Za-z0-9 ]{0,99}",
                cents in 1u32..=1_000_000,
                stock in 0i64..=10_000,
                cat_count in 1usize..=10,
            ) {
                let categories = (0..cat_count)
                    .map(|i| CategoryInput::new(format!("Categoria {}", char::from(b'a' + i as u8)), None))
                    .collect();
                let input = ProductInput {
                    name,
                    price: f64::from(cents) / 100.0,
                    categories,
                    stock,
                };

                let details = ProductDetails::parse(input);
                prop_assert!(details.is_ok(), "rejected: {:?}", details.err());
                let details = details.unwrap();
                prop_assert_eq!(details.price(), Decimal::new(i64::from(cents), 2));
                prop_assert_eq!(details.categories().len(), cat_count);
            }

            /// Property: normalizing a stored name again leaves it unchanged.
            #[test]
            fn stored_names_are_already_normalized(name in "[ a-zA-Z]{1,40}[a-zA-Z]") {
                let details = ProductDetails::parse(ProductInput {
                    name,
                    ..valid_input()
                }).unwrap();
                prop_assert_eq!(normalize_title(details.name()), details.name());
            }
        }
    }
}
