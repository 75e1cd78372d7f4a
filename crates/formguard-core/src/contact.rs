//! The built-in contact form.

use crate::config::FormConfig;
use crate::schema::FormSpec;

const CONTACT_FORM_JSON: &str = include_str!("contact_form.json");

/// Field names of the contact form.
pub mod fields {
    /// Full name. Required, 2 to 50 letters and spaces.
    pub const NOMBRE: &str = "nombre";
    /// Email address. Required.
    pub const EMAIL: &str = "email";
    /// Phone number. Optional.
    pub const TELEFONO: &str = "telefono";
    /// Company name. Optional, at most 100 characters.
    pub const EMPRESA: &str = "empresa";
    /// Service of interest. Optional, no rules.
    pub const SERVICIO: &str = "servicio";
    /// Message body. Required, 10 to 500 characters.
    pub const MENSAJE: &str = "mensaje";
}

/// Maximum length of the contact form message.
pub const MESSAGE_MAX_LENGTH: usize = 500;

/// Returns the configuration of the contact form, presentation hints
/// included.
pub fn contact_config() -> FormConfig {
    FormConfig::from_json(CONTACT_FORM_JSON).expect("built-in contact form config is valid JSON")
}

/// Returns the contact form spec.
pub fn contact_form() -> FormSpec {
    contact_config()
        .build()
        .expect("built-in contact form config is a valid spec")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[test]
    fn test_contact_form_fields() {
        let spec = contact_form();
        assert_eq!(
            spec.field_names().collect::<Vec<_>>(),
            vec![
                fields::NOMBRE,
                fields::EMAIL,
                fields::TELEFONO,
                fields::EMPRESA,
                fields::SERVICIO,
                fields::MENSAJE,
            ]
        );
    }

    #[test]
    fn test_message_limit_matches_rules() {
        let spec = contact_form();
        let mensaje = spec.field(fields::MENSAJE).unwrap();
        assert!(mensaje.rules.contains(&Rule::MaxLength(MESSAGE_MAX_LENGTH)));
    }

    #[test]
    fn test_servicio_has_choices() {
        let config = contact_config();
        assert!(!config.field(fields::SERVICIO).unwrap().choices.is_empty());
        assert!(contact_form().field(fields::SERVICIO).unwrap().rules.is_empty());
    }
}
