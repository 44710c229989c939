//! Suggested sub-items for each expense category
//!
//! The lists drive item pickers and the default item of a new expense. They
//! are suggestions only: any free-text label is accepted as a sub-item.

use crate::models::ExpenseCategory;

const MONTHLY_GROCERIES: &[&str] = &[
    "Rice",
    "Lentils (Dal)",
    "Soybean Oil",
    "Mustard Oil",
    "Eggs",
    "Milk",
    "Beef",
    "Chicken",
    "Mutton",
    "Fish",
    "Salt",
    "Sugar",
    "Spices (Masala)",
    "Flour (Atta)",
    "Maida",
    "Tea",
    "Detergent Powder (Wheel/Surf Excel)",
    "Liquid Detergent",
    "Fabric Softener",
    "Dishwashing Liquid (Vim)",
    "Floor Cleaner (Lysol)",
    "Toilet Cleaner (Harpic)",
    "Glass Cleaner",
    "Soap (Lifebuoy/Lux)",
    "Handwash",
    "Onion",
    "Garlic",
    "Ginger",
    "Potatoes",
    "Dry Fruits",
];

const DAILY_GROCERIES: &[&str] = &[
    "Seasonal Vegetables",
    "Green Chili",
    "Coriander Leaves",
    "Milk (Liquid)",
    "Eggs",
    "Fresh Fish",
    "Bread",
    "Curd",
    "Dishwashing Bar/Paste",
    "Hand Soap",
    "Snacks",
];

const LAUNDRY_IRONING: &[&str] = &["Washing", "Ironing", "Dry Cleaning", "Steam Press"];

const UTILITIES: &[&str] = &[
    "Electricity (DESCO/DPDC)",
    "Gas (Cylinder)",
    "Gas (Line/Titas)",
    "Water (WASA)",
    "Internet (Fiber)",
    "Mobile Recharge",
    "Dish/Cable TV",
];

const TRANSPORT: &[&str] = &[
    "Rickshaw",
    "CNG",
    "Local Bus",
    "Intercity Train",
    "Uber/Pathao",
    "Fuel (Octane/CNG)",
    "Car Maintenance",
];

const HEALTHCARE: &[&str] = &[
    "General Medicine",
    "Specialized Medicine",
    "Doctor Consultation",
    "Lab Test",
    "Hospital Bill",
];

const EDUCATION: &[&str] = &["School/University Fee", "Tuition Fee", "Books & Stationery"];

const ENTERTAINMENT: &[&str] = &["Restaurant Dining", "Movie Tickets", "OTT Subscriptions"];

const RENT: &[&str] = &["House Rent", "Garage Rent"];

const OTHERS: &[&str] = &["Gifts", "Charity/Zakat", "Repairs", "Misc"];

/// Suggested sub-items for a category, in display order
pub fn suggested_items(category: ExpenseCategory) -> &'static [&'static str] {
    match category {
        ExpenseCategory::MonthlyGroceries => MONTHLY_GROCERIES,
        ExpenseCategory::DailyGroceries => DAILY_GROCERIES,
        ExpenseCategory::LaundryIroning => LAUNDRY_IRONING,
        ExpenseCategory::Rent => RENT,
        ExpenseCategory::Utilities => UTILITIES,
        ExpenseCategory::Transport => TRANSPORT,
        ExpenseCategory::Healthcare => HEALTHCARE,
        ExpenseCategory::Education => EDUCATION,
        ExpenseCategory::Entertainment => ENTERTAINMENT,
        ExpenseCategory::Others => OTHERS,
    }
}

/// Item preselected when an expense is entered without one
pub fn default_item(category: ExpenseCategory) -> Option<&'static str> {
    suggested_items(category).first().copied()
}

/// Case-insensitive membership check against the suggestions
pub fn is_suggested(category: ExpenseCategory, item: &str) -> bool {
    let item = item.trim();
    suggested_items(category)
        .iter()
        .any(|s| s.eq_ignore_ascii_case(item))
}

/// Resolve user input to the catalog's spelling when it matches a suggestion,
/// otherwise keep the trimmed input as a custom label
pub fn canonical_item(category: ExpenseCategory, item: &str) -> String {
    let item = item.trim();
    suggested_items(category)
        .iter()
        .find(|s| s.eq_ignore_ascii_case(item))
        .map(|s| s.to_string())
        .unwrap_or_else(|| item.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_suggestions() {
        for category in ExpenseCategory::all() {
            assert!(
                !suggested_items(*category).is_empty(),
                "{} has no items",
                category
            );
        }
    }

    #[test]
    fn test_default_item_is_first_suggestion() {
        assert_eq!(default_item(ExpenseCategory::MonthlyGroceries), Some("Rice"));
        assert_eq!(default_item(ExpenseCategory::Rent), Some("House Rent"));
    }

    #[test]
    fn test_canonical_item() {
        assert_eq!(canonical_item(ExpenseCategory::Transport, "cng"), "CNG");
        assert_eq!(
            canonical_item(ExpenseCategory::Transport, "  Ferry "),
            "Ferry"
        );
        assert!(is_suggested(ExpenseCategory::DailyGroceries, "bread"));
        assert!(!is_suggested(ExpenseCategory::DailyGroceries, "Rice"));
    }
}
