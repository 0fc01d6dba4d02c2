// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values and example files.

use super::schema::FormcheckConfig;

/// Get the default configuration.
pub fn default_config() -> FormcheckConfig {
    FormcheckConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# formcheck configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Which elements take part in validation and the classes the engine toggles
[validation]
form_selector = ".popup__form"
input_selector = ".popup__input"
submit_button_selector = ".popup__button"
inactive_button_class = "popup__button_disabled"
input_error_class = "popup__input_type_error"
error_class = "popup__error_visible"

# Rules for fields carrying the message attribute
[rules]
min_length = 2
name_max_length = 40
default_max_length = 30
name_like_class = "popup__input_type_name"
message_attribute = "data-error-message"
locale = "ru"

# Modal popups
[modal]
popup_selector = ".popup"
opened_class = "popup_is-opened"
close_button_selector = ".popup__close"
body_lock_class = "body_no-scroll"
close_key = "Escape"
"#
}

/// Generate an example page description: the gallery's four popup forms.
pub fn example_page() -> &'static str {
    r#"# formcheck page description
title = "Mesto"

[[popups]]
id = "popup-edit"
classes = ["popup", "popup_type_edit"]

[[popups]]
id = "popup-new-card"
classes = ["popup", "popup_type_new-card"]

[[popups]]
id = "popup-avatar"
classes = ["popup", "popup_type_edit-avatar"]

[[popups]]
id = "popup-remove"
classes = ["popup", "popup_type_remove-card"]

# Edit profile
[[forms]]
id = "edit-profile"
name = "edit-profile"
popup = "popup-edit"

[[forms.fields]]
id = "user-name"
classes = ["popup__input", "popup__input_type_name"]
type = "text"
name = "user-name"
placeholder = "Имя"
required = true
minlength = 2
maxlength = 40
value = "Жак-Ив Кусто"
attributes = { "data-error-message" = "Разрешены только латинские, кириллические буквы, знаки дефиса и пробелы" }

[[forms.fields]]
id = "user-description"
classes = ["popup__input", "popup__input_type_description"]
type = "text"
name = "user-description"
placeholder = "Занятие"
required = true
value = "Исследователь океана"
attributes = { "data-error-message" = "Разрешены только латинские, кириллические буквы, знаки дефиса и пробелы" }

[forms.submit]
text = "Сохранить"

# New card
[[forms]]
id = "new-place"
name = "new-place"
popup = "popup-new-card"

[[forms.fields]]
id = "place-name"
classes = ["popup__input", "popup__input_type_card-name"]
type = "text"
name = "place-name"
placeholder = "Название"
required = true
attributes = { "data-error-message" = "Разрешены только латинские, кириллические буквы, знаки дефиса и пробелы" }

[[forms.fields]]
id = "link"
classes = ["popup__input", "popup__input_type_url"]
type = "url"
name = "link"
placeholder = "Ссылка на картинку"
required = true

[forms.submit]
text = "Сохранить"

# Avatar
[[forms]]
id = "edit-avatar"
name = "edit-avatar"
popup = "popup-avatar"

[[forms.fields]]
id = "avatar-link"
classes = ["popup__input", "popup__input_type_avatar"]
type = "url"
name = "avatar"
placeholder = "Ссылка на аватар"
required = true

[forms.submit]
text = "Сохранить"

# Card removal confirmation has no fields
[[forms]]
id = "remove-card"
name = "remove-card"
popup = "popup-remove"

[forms.submit]
text = "Да"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.rules.name_max_length, 40);
        assert_eq!(config.modal.close_key, "Escape");
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = super::super::parse_config(example_config()).expect("Example config should parse");
        assert_eq!(config.validation, default_config().validation);
        assert_eq!(config.rules, default_config().rules);
        assert_eq!(config.modal, default_config().modal);
    }

    #[test]
    fn test_example_page_builds() {
        let spec = crate::page::PageSpec::parse(example_page()).expect("Example page should parse");
        assert_eq!(spec.forms.len(), 4);
        spec.build().expect("Example page should build");
    }
}
