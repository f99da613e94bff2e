use crate::model::{DtoInfo, EnumInfo, ServiceType};

/// Maximum number of enum values spelled out in a JSON example.
const MAX_EXAMPLE_ENUM_VALUES: usize = 3;

/// Render the short type signature used in field tables.
///
/// Named types become relative links to their own document:
///
/// ```rust,ignore
/// // result<[Widget](Widget.md)[]>
/// render_field_type(&ServiceType::Result(Box::new(ServiceType::Array(Box::new(dto)))));
/// ```
#[must_use]
pub fn render_field_type(ty: &ServiceType<'_>) -> String {
    match ty {
        ServiceType::String => "string".to_string(),
        ServiceType::Boolean => "boolean".to_string(),
        ServiceType::Double => "double".to_string(),
        ServiceType::Decimal => "decimal".to_string(),
        ServiceType::Int32 => "int32".to_string(),
        ServiceType::Int64 => "int64".to_string(),
        ServiceType::Bytes => "bytes".to_string(),
        ServiceType::Object => "object".to_string(),
        ServiceType::Error => "error".to_string(),
        ServiceType::Dto(dto) => link(&dto.name),
        ServiceType::Enum(en) => link(&en.name),
        ServiceType::Result(value) => format!("result<{}>", render_field_type(value)),
        ServiceType::Array(value) => format!("{}[]", render_field_type(value)),
        ServiceType::Map(value) => format!("map<{}>", render_field_type(value)),
    }
}

/// Render a placeholder showing the JSON shape of a value of `ty`.
///
/// DTOs and enums are unrolled one level only (first visible field, first
/// few visible values), so recursion depth is bounded by the nesting of
/// `result`/array/`map` wrappers even when DTOs reference each other.
#[must_use]
pub fn render_field_type_as_json_value(ty: &ServiceType<'_>) -> String {
    match ty {
        ServiceType::String => "\"(string)\"".to_string(),
        ServiceType::Boolean => "(true|false)".to_string(),
        ServiceType::Double | ServiceType::Decimal => "(number)".to_string(),
        ServiceType::Int32 | ServiceType::Int64 => "(integer)".to_string(),
        ServiceType::Bytes => "\"(base64)\"".to_string(),
        ServiceType::Object => "{ ... }".to_string(),
        ServiceType::Error => "{ \"code\": ... }".to_string(),
        ServiceType::Dto(dto) => render_dto_as_json_value(dto),
        ServiceType::Enum(en) => render_enum_as_json_value(en),
        ServiceType::Result(value) => format!(
            "{{ \"value\": {} | \"error\": {{ \"code\": ... }} }}",
            render_field_type_as_json_value(value)
        ),
        ServiceType::Array(value) => {
            format!("[ {}, ... ]", render_field_type_as_json_value(value))
        }
        ServiceType::Map(value) => {
            format!("{{ \"...\": {}, ... }}", render_field_type_as_json_value(value))
        }
    }
}

fn link(name: &str) -> String {
    format!("[{name}]({name}.md)")
}

fn render_dto_as_json_value(dto: &DtoInfo) -> String {
    match dto.visible_fields().next() {
        Some(first) => format!("{{ \"{}\": ... }}", first.name),
        None => "{}".to_string(),
    }
}

fn render_enum_as_json_value(en: &EnumInfo) -> String {
    let names: Vec<&str> = en.visible_values().map(|v| v.name.as_str()).collect();
    if let [only] = names.as_slice() {
        return format!("\"{only}\"");
    }
    let shown = names
        .iter()
        .take(MAX_EXAMPLE_ENUM_VALUES)
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    let more = if names.len() > MAX_EXAMPLE_ENUM_VALUES { "|..." } else { "" };
    format!("\"({shown}{more})\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValueInfo, FieldInfo};

    fn field(name: &str, obsolete: bool) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            type_name: "string".into(),
            obsolete,
            ..Default::default()
        }
    }

    fn enum_with(values: &[&str]) -> EnumInfo {
        EnumInfo {
            name: "Color".into(),
            values: values
                .iter()
                .map(|v| EnumValueInfo {
                    name: (*v).into(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scalar_signatures() {
        let cases = [
            (ServiceType::String, "string"),
            (ServiceType::Boolean, "boolean"),
            (ServiceType::Double, "double"),
            (ServiceType::Decimal, "decimal"),
            (ServiceType::Int32, "int32"),
            (ServiceType::Int64, "int64"),
            (ServiceType::Bytes, "bytes"),
            (ServiceType::Object, "object"),
            (ServiceType::Error, "error"),
        ];
        for (ty, expected) in cases {
            assert_eq!(render_field_type(&ty), expected);
        }
    }

    #[test]
    fn test_scalar_examples() {
        assert_eq!(render_field_type_as_json_value(&ServiceType::String), "\"(string)\"");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Boolean), "(true|false)");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Double), "(number)");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Decimal), "(number)");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Int32), "(integer)");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Int64), "(integer)");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Bytes), "\"(base64)\"");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Object), "{ ... }");
        assert_eq!(render_field_type_as_json_value(&ServiceType::Error), "{ \"code\": ... }");
    }

    #[test]
    fn test_named_type_links() {
        let dto = DtoInfo {
            name: "Widget".into(),
            ..Default::default()
        };
        let en = enum_with(&["red"]);
        assert_eq!(render_field_type(&ServiceType::Dto(&dto)), "[Widget](Widget.md)");
        assert_eq!(render_field_type(&ServiceType::Enum(&en)), "[Color](Color.md)");
        assert_eq!(
            render_field_type(&ServiceType::Map(Box::new(ServiceType::Dto(&dto)))),
            "map<[Widget](Widget.md)>"
        );
    }

    #[test]
    fn test_result_of_array_of_int32() {
        let ty = ServiceType::Result(Box::new(ServiceType::Array(Box::new(ServiceType::Int32))));
        assert_eq!(render_field_type(&ty), "result<int32[]>");
        assert_eq!(
            render_field_type_as_json_value(&ty),
            "{ \"value\": [ (integer), ... ] | \"error\": { \"code\": ... } }"
        );
    }

    #[test]
    fn test_map_example() {
        let ty = ServiceType::Map(Box::new(ServiceType::String));
        assert_eq!(render_field_type_as_json_value(&ty), "{ \"...\": \"(string)\", ... }");
    }

    #[test]
    fn test_dto_examples_use_first_visible_field() {
        let empty = DtoInfo::default();
        assert_eq!(render_field_type_as_json_value(&ServiceType::Dto(&empty)), "{}");

        let all_obsolete = DtoInfo {
            fields: vec![field("a", true)],
            ..Default::default()
        };
        assert_eq!(render_field_type_as_json_value(&ServiceType::Dto(&all_obsolete)), "{}");

        let dto = DtoInfo {
            fields: vec![field("a", true), field("b", false), field("c", false)],
            ..Default::default()
        };
        assert_eq!(render_field_type_as_json_value(&ServiceType::Dto(&dto)), "{ \"b\": ... }");
    }

    #[test]
    fn test_enum_examples() {
        let one = enum_with(&["A"]);
        assert_eq!(render_field_type_as_json_value(&ServiceType::Enum(&one)), "\"A\"");

        let three = enum_with(&["A", "B", "C"]);
        assert_eq!(render_field_type_as_json_value(&ServiceType::Enum(&three)), "\"(A|B|C)\"");

        let four = enum_with(&["A", "B", "C", "D"]);
        assert_eq!(
            render_field_type_as_json_value(&ServiceType::Enum(&four)),
            "\"(A|B|C|...)\""
        );
    }

    #[test]
    fn test_enum_example_skips_obsolete_values() {
        let mut en = enum_with(&["A", "B"]);
        en.values[0].obsolete = true;
        assert_eq!(render_field_type_as_json_value(&ServiceType::Enum(&en)), "\"B\"");
    }
}
