use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    #[validate(min_length = 10, message = "Comment must be at least 10 characters.")]
    #[validate(
        max_length = 500,
        message = "Comment must not be longer than 500 characters."
    )]
    pub comment_text: String,
    pub product_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_are_enforced() {
        let form = CommentForm {
            comment_text: "too short".into(),
            product_id: 1,
        };
        assert!(form.validate().is_err());

        let form = CommentForm {
            comment_text: "long enough to be worth reading".into(),
            product_id: 1,
        };
        assert!(form.validate().is_ok());

        let form = CommentForm {
            comment_text: "x".repeat(501),
            product_id: 1,
        };
        assert!(form.validate().is_err());
    }
}
