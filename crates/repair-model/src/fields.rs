//! Registry of the semantic columns the repair rules recognize.
//!
//! Unrecognized columns pass through every engine untouched.

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const GENDER: &str = "gender";
pub const MARITAL_STATUS: &str = "marital_status";
pub const AGE: &str = "age";
pub const LOYALTY_POINTS: &str = "loyalty_points";
pub const COUNTRY: &str = "country";
pub const CITY: &str = "city";

/// Derived columns appended by the enrichment engine.
pub const IS_LOYAL_CUSTOMER: &str = "is_loyal_customer";
pub const CUSTOMER_PERSONA: &str = "customer_persona";

pub const NAME_COLUMNS: [&str; 3] = [FIRST_NAME, LAST_NAME, FULL_NAME];

pub const RECOGNIZED: [&str; 11] = [
    FIRST_NAME,
    LAST_NAME,
    FULL_NAME,
    EMAIL,
    PHONE,
    GENDER,
    MARITAL_STATUS,
    AGE,
    LOYALTY_POINTS,
    COUNTRY,
    CITY,
];

pub fn is_recognized(column: &str) -> bool {
    RECOGNIZED.contains(&column)
}

pub fn is_name_column(column: &str) -> bool {
    NAME_COLUMNS.contains(&column)
}

/// One-line rule description per recognized column, for the CLI listing.
pub fn rule_summary(column: &str) -> &'static str {
    match column {
        FIRST_NAME | LAST_NAME | FULL_NAME => "title-cased name, placeholders cleared",
        EMAIL => "local@domain.tld shape",
        PHONE => "canonical NNN-NNNN / NNNN-NNNN",
        GENDER => "vocabulary: Male, Female, Other",
        MARITAL_STATUS => "vocabulary: Single, Married, Divorced, Widowed",
        AGE => "integer in 1..=120",
        LOYALTY_POINTS => "non-negative number",
        COUNTRY => "canonical country name (fuzzy-corrected)",
        CITY => "canonical city name (fuzzy-corrected)",
        _ => "passes through untouched",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_rule_columns_only() {
        assert!(is_recognized("email"));
        assert!(is_recognized("loyalty_points"));
        assert!(!is_recognized("customer_notes"));
        assert!(!is_recognized(IS_LOYAL_CUSTOMER));
    }
}
