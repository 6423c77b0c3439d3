use serde::Serialize;

use super::{is_blank, FieldError};
use crate::products::wizard::ProductDraft;

/// Step 1: name and purchase date.
pub fn validate_basic_info(draft: &ProductDraft) -> bool {
    !is_blank(&draft.basic.name) && !is_blank(&draft.basic.purchase_date)
}

/// Step 2: brand and price.
pub fn validate_details(draft: &ProductDraft) -> bool {
    !is_blank(&draft.details.brand) && !is_blank(&draft.details.price)
}

pub fn validate_form(draft: &ProductDraft) -> bool {
    validate_basic_info(draft) && validate_details(draft)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub basic_info: bool,
    pub details: bool,
    pub complete: bool,
}

pub fn step_status(draft: &ProductDraft) -> StepStatus {
    let basic_info = validate_basic_info(draft);
    let details = validate_details(draft);
    StepStatus {
        basic_info,
        details,
        complete: basic_info && details,
    }
}

pub fn missing_fields(draft: &ProductDraft) -> Vec<FieldError> {
    [
        ("name", &draft.basic.name, "Name is required"),
        ("purchase_date", &draft.basic.purchase_date, "Purchase date is required"),
        ("brand", &draft.details.brand, "Brand is required"),
        ("price", &draft.details.price, "Price is required"),
    ]
    .into_iter()
    .filter(|(_, value, _)| is_blank(value))
    .map(|(field, _, message)| FieldError::new(field, message))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::wizard::{BasicInfo, Details};

    #[test]
    fn empty_draft_fails_every_step() {
        let draft = ProductDraft::default();
        assert_eq!(
            step_status(&draft),
            StepStatus {
                basic_info: false,
                details: false,
                complete: false
            }
        );
        assert_eq!(missing_fields(&draft).len(), 4);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let draft = ProductDraft::default().with_basic_info(BasicInfo {
            name: "Lamp".into(),
            purchase_date: "   ".into(),
            ..BasicInfo::default()
        });
        assert!(!validate_basic_info(&draft));
    }

    #[test]
    fn steps_are_independent() {
        let draft = ProductDraft::default().with_details(Details {
            brand: "Acme".into(),
            price: "10".into(),
            ..Details::default()
        });
        assert!(!validate_basic_info(&draft));
        assert!(validate_details(&draft));
        assert!(!validate_form(&draft));

        let draft = draft.with_basic_info(BasicInfo {
            name: "Lamp".into(),
            purchase_date: "01/01/2020".into(),
            ..BasicInfo::default()
        });
        assert!(validate_form(&draft));
        assert!(missing_fields(&draft).is_empty());
    }
}
