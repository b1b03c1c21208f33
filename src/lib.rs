//! MD Form
//!
//! Translates a model schema (a JSON-Schema-like document with `definitions`,
//! `$ref` pointers, discriminated `oneOf` unions and validation keywords) into
//! the flat form-field schema a form-rendering client consumes.
//!
//! # Example
//!
//! ```
//! use md_form::{translate, TranslateOptions};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "definitions": {
//!         "Count": { "type": "integer", "minimum": 0, "maximum": 10 }
//!     },
//!     "properties": {
//!         "count": {
//!             "$ref": "#/definitions/Count",
//!             "name": "Count",
//!             "field_type": "number"
//!         }
//!     }
//! });
//!
//! let form = translate(&schema, &TranslateOptions::default()).unwrap();
//!
//! assert_eq!(form["count"]["parameters"], json!({ "min": 0, "max": 10 }));
//! assert!(form["count"].get("type").is_none());
//! ```
//!
//! # Passes
//!
//! | Pass | Effect |
//! |------|--------|
//! | `convert-enums` | `enum` → `options: [{name, value}]` |
//! | `resolve-one-of` | variant fields of discriminated unions become siblings |
//! | `resolve-refs` | `$ref` inlined, `definitions` dropped |
//! | `rename-keys` | `maximum`/`maxItems` → `max`, `minimum`/`minItems` → `min` |
//! | `move-to-parameters` | `options`, `min`, `max` moved under `parameters` |
//! | `flatten-properties` | `properties` merged into its parent, parent wins |
//! | `flatten-items` | `items` merged into its parent, items win |
//! | `promote-params` | `params` contents spliced into its parent |
//! | `remove-outer-key` | top-level `output_dataset_type` dropped |
//! | `remove-outer-non-objects` | top-level non-objects dropped |
//! | `filter-field-keys` | field records reduced to the allowed keys |

mod cleanup;
mod discriminator;
mod enums;
mod error;
mod flatten;
mod keywords;
mod loader;
mod pipeline;
mod resolver;
mod types;

pub use cleanup::{filter_field_keys, remove_outer_key, remove_outer_non_objects};
pub use discriminator::resolve_one_of;
pub use enums::{convert_enums_to_options, title_case};
pub use error::TranslateError;
pub use flatten::{flatten_properties, promote_key, Precedence};
pub use keywords::{move_to_parameters, rename_keys};
pub use loader::{load_document, load_document_str, load_options};
pub use pipeline::{translate, Pass, Pipeline};
pub use resolver::{lookup_ref, resolve_refs};
pub use types::{
    json_type_name, TranslateOptions, DEFAULT_ALLOWED_KEYS, DEFAULT_KEY_MAPPING,
    DEFAULT_RELOCATED_KEYS,
};
