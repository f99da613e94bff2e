#![allow(dead_code)]

use servicedoc::config::{GeneratorSettings, NewlineMode};
use servicedoc::generator::{CodeGenOutput, MarkdownGenerator};
use servicedoc::model::{DocumentFormat, ServiceDocument};
use std::path::{Path, PathBuf};

/// A service exercising every element kind: DTOs that reference each other,
/// obsolete members, an enum with more values than an example spells out,
/// an error set and an HTTP binding with query, header and body fields.
pub const WIDGET_SERVICE: &str = r#"
service:
  name: WidgetApi
  summary: Manages widgets.
  remarks:
    - "Widgets are described by [Widget]()."
  methods:
    - name: getWidget
      summary: Gets a widget.
      request_fields:
        - { name: id, type: string, summary: The widget id. }
        - { name: ifNoneMatch, type: string }
      response_fields:
        - { name: widget, type: Widget }
        - { name: notModified, type: boolean }
    - name: createWidget
      summary: Creates a widget.
      request_fields:
        - { name: name, type: string }
        - { name: color, type: Color }
        - { name: tags, type: "string[]" }
      response_fields:
        - { name: widget, type: "result<Widget>" }
    - name: legacyWidget
      obsolete: true
  dtos:
    - name: Widget
      summary: A widget.
      fields:
        - { name: id, type: string }
        - { name: parts, type: "Part[]" }
        - { name: attributes, type: "map<int64>" }
        - { name: weight, type: double, obsolete: true }
    - name: Part
      fields:
        - { name: owner, type: Widget }
        - { name: count, type: int32 }
    - name: Empty
    - name: OldThing
      obsolete: true
  enums:
    - name: Color
      summary: Colors.
      values:
        - { name: red }
        - { name: green }
        - { name: blue }
        - { name: black }
        - { name: mauve, obsolete: true }
  error_sets:
    - name: WidgetErrors
      errors:
        - { name: NotFound, summary: The widget does not exist. }
        - { name: Gone, obsolete: true }
http:
  url: https://api.example.com/v1
  methods:
    - method: getWidget
      verb: get
      path: "/widgets/{id}"
      path_fields: [id]
      request_header_fields:
        - { name: If-None-Match, field: ifNoneMatch }
      responses:
        - status: 200
          body_field: widget
        - status: 304
          body_field: notModified
    - method: createWidget
      verb: POST
      path: /widgets
      query_fields: [tags]
      request_normal_fields: [name, color]
      responses:
        - status: 201
          normal_fields: [widget]
"#;

pub fn widget_document() -> ServiceDocument {
    ServiceDocument::parse(WIDGET_SERVICE, DocumentFormat::Yaml).unwrap()
}

/// Settings with a fixed newline so expectations do not depend on the platform.
pub fn lf_settings() -> GeneratorSettings {
    GeneratorSettings {
        newline: NewlineMode::Lf,
        ..GeneratorSettings::default()
    }
}

pub fn generate(settings: GeneratorSettings) -> CodeGenOutput {
    MarkdownGenerator::new(settings)
        .generate_output(&widget_document())
        .unwrap()
}

/// Text of the generated file called `name`.
pub fn file_text<'a>(output: &'a CodeGenOutput, name: &str) -> &'a str {
    output
        .files
        .iter()
        .find(|f| f.name() == name)
        .unwrap_or_else(|| panic!("no generated file {name}"))
        .text()
}

/// Write the widget service into `dir` and return its path.
pub fn write_widget_service(dir: &Path) -> PathBuf {
    let path = dir.join("widgets.yaml");
    std::fs::write(&path, WIDGET_SERVICE).unwrap();
    path
}
