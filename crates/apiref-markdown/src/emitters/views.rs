use apiref_core::Document;
use apiref_core::config::DocsConfig;
use apiref_core::extract::OperationRecord;
use apiref_core::label::schema_label;
use apiref_core::value::{
    display_block, display_text, first_text, last_segment, lookup, lookup_mapping,
    lookup_truthy, trimmed_text, truthy,
};
use serde::Serialize;
use serde_yaml_ng::Value;

const UNKNOWN: &str = "unknown";

/// One operation section of a group page.
#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
    pub name: String,
    pub method: &'static str,
    pub path: String,
    pub summary: String,
    pub description: String,
    pub deprecated: bool,
    pub beta: bool,
    pub returns: String,
    /// Bullet lines, without the leading `- `.
    pub parameters: Vec<String>,
    pub request_body: Vec<String>,
    pub responses: Vec<String>,
    pub has_examples: bool,
    pub request_examples: Vec<ExampleView>,
    pub has_response_example: bool,
    pub response_example: String,
}

/// A labelled code block under `### Examples`.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleView {
    pub label: String,
    pub language: String,
    pub code: String,
}

impl OperationView {
    pub fn build(doc: &Document, record: &OperationRecord<'_>, config: &DocsConfig) -> Self {
        let op = record.operation;
        let (has_examples, request_examples, response_example) = examples(record, config);

        Self {
            name: record.name.clone(),
            method: record.method.as_str(),
            path: record.path.clone(),
            summary: trimmed_text(lookup(op, "summary")),
            description: trimmed_text(lookup(op, "description")),
            deprecated: truthy(lookup(op, "deprecated")),
            beta: truthy(record.meta_value("beta")),
            returns: trimmed_text(record.meta_value("returns")),
            parameters: record
                .params
                .iter()
                .map(|param| parameter_line(doc, param))
                .collect(),
            request_body: request_body_lines(doc, op),
            responses: response_lines(doc, op),
            has_examples,
            request_examples,
            has_response_example: response_example.is_some(),
            response_example: response_example.unwrap_or_default(),
        }
    }
}

/// `` `name` (location, required|optional) `label`: description ``
pub fn parameter_line(doc: &Document, param: &Value) -> String {
    let resolved = doc.resolve(param);

    let name = first_text([lookup(resolved, "name")]).unwrap_or_else(|| {
        lookup_truthy(param, "$ref")
            .map(|r| last_segment(&display_text(r)).to_string())
            .filter(|segment| !segment.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    });
    let location = first_text([lookup(resolved, "in")]).unwrap_or_else(|| UNKNOWN.to_string());
    let required = if truthy(lookup(resolved, "required")) {
        "required"
    } else {
        "optional"
    };

    let mut line = format!("`{name}` ({location}, {required})");
    let label = lookup(resolved, "schema").map(schema_label).unwrap_or_default();
    if !label.is_empty() {
        line.push_str(&format!(" `{label}`"));
    }
    let description = trimmed_text(lookup(resolved, "description"));
    if !description.is_empty() {
        line.push_str(&format!(": {description}"));
    }
    line
}

/// Label of a media type object's schema, resolved one hop first.
fn media_schema_label(doc: &Document, media: &Value) -> String {
    lookup_truthy(media, "schema")
        .map(|schema| schema_label(doc.resolve(schema)))
        .unwrap_or_default()
}

/// One line per content type of the (resolved) request body.
pub fn request_body_lines(doc: &Document, op: &Value) -> Vec<String> {
    let Some(body) = lookup_truthy(op, "requestBody") else {
        return Vec::new();
    };
    let Some(content) = lookup_mapping(doc.resolve(body), "content") else {
        return Vec::new();
    };

    content
        .iter()
        .map(|(content_type, media)| {
            let label = media_schema_label(doc, media);
            let content_type = display_text(content_type);
            if label.is_empty() {
                format!("`{content_type}`")
            } else {
                format!("`{content_type}` `{label}`")
            }
        })
        .collect()
}

/// One line per status code, sorted by the status code text.
pub fn response_lines(doc: &Document, op: &Value) -> Vec<String> {
    let Some(responses) = lookup_mapping(op, "responses") else {
        return Vec::new();
    };

    let mut entries: Vec<(String, &Value)> = responses
        .iter()
        .map(|(status, response)| (display_text(status), response))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .map(|(status, response)| {
            let resolved = doc.resolve(response);
            let mut line = format!("`{status}`");

            let description = trimmed_text(lookup(resolved, "description"));
            if !description.is_empty() {
                line.push_str(&format!(": {description}"));
            }

            if let Some(content) = lookup_mapping(resolved, "content").filter(|c| !c.is_empty()) {
                let media: Vec<String> = content
                    .iter()
                    .map(|(content_type, media)| {
                        let label = media_schema_label(doc, media);
                        let content_type = display_text(content_type);
                        if label.is_empty() {
                            format!("`{content_type}`")
                        } else {
                            format!("`{content_type}` ({label})")
                        }
                    })
                    .collect();
                line.push_str(&format!(" ({})", media.join(", ")));
            }
            line
        })
        .collect()
}

/// Split `x-oaiMeta.examples` into request code blocks and a response body.
///
/// A mapping carries `request` and `response` members. Any other truthy
/// value is taken as the response example as a whole. The flag is set when
/// either member is present, even if it yields no code blocks.
fn examples(
    record: &OperationRecord<'_>,
    config: &DocsConfig,
) -> (bool, Vec<ExampleView>, Option<String>) {
    let Some(examples) = record.meta_value("examples").filter(|v| truthy(Some(*v))) else {
        return (false, Vec::new(), None);
    };

    let (request, response) = if examples.is_mapping() {
        (
            lookup_truthy(examples, "request"),
            lookup_truthy(examples, "response"),
        )
    } else {
        (None, Some(examples))
    };

    let request_examples = match request {
        Some(Value::Mapping(by_label)) => by_label
            .iter()
            .map(|(label, code)| {
                let label = display_text(label);
                ExampleView {
                    language: config.language_for(&label).to_string(),
                    code: display_block(code).trim_end().to_string(),
                    label,
                }
            })
            .collect(),
        Some(code) => vec![ExampleView {
            label: "request".to_string(),
            language: "text".to_string(),
            code: display_block(code).trim_end().to_string(),
        }],
        None => Vec::new(),
    };

    let present = request.is_some() || response.is_some();
    let response_example = response.map(|body| display_block(body).trim_end().to_string());
    (present, request_examples, response_example)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiref_core::extract::extract_operations;
    use apiref_core::load::parse_document;

    fn yaml(src: &str) -> Value {
        serde_yaml_ng::from_str(src).unwrap()
    }

    const COMPONENTS: &str = r##"
components:
  parameters:
    Limit:
      name: limit
      in: query
      description: "  Max items.  "
      schema: {type: integer}
  responses:
    NotFound:
      description: Not found
      content:
        application/json:
          schema: {$ref: '#/components/schemas/Error'}
  schemas:
    Error:
      type: object
      properties: {code: {}, message: {}}
"##;

    #[test]
    fn test_parameter_line_inline() {
        let doc = parse_document(COMPONENTS).unwrap();
        let param = yaml("{name: id, in: path, required: true, schema: {type: string}}");
        assert_eq!(parameter_line(&doc, &param), "`id` (path, required) `string`");
    }

    #[test]
    fn test_parameter_line_resolved() {
        let doc = parse_document(COMPONENTS).unwrap();
        let param = yaml(r##"{"$ref": "#/components/parameters/Limit"}"##);
        assert_eq!(
            parameter_line(&doc, &param),
            "`limit` (query, optional) `integer`: Max items."
        );
    }

    #[test]
    fn test_parameter_line_unresolved() {
        let doc = parse_document(COMPONENTS).unwrap();
        let param = yaml(r##"{"$ref": "#/components/parameters/Cursor"}"##);
        assert_eq!(parameter_line(&doc, &param), "`Cursor` (unknown, optional)");
        assert_eq!(parameter_line(&doc, &yaml("{}")), "`unknown` (unknown, optional)");
        assert_eq!(parameter_line(&doc, &yaml("bare")), "`unknown` (unknown, optional)");
    }

    #[test]
    fn test_response_lines_sorted_and_resolved() {
        let doc = parse_document(COMPONENTS).unwrap();
        let op = yaml(
            r##"
responses:
  "404": {$ref: '#/components/responses/NotFound'}
  "200":
    description: "OK "
    content:
      application/json: {schema: {type: array, items: {type: string}}}
      text/plain: {}
  default: {}
"##,
        );
        assert_eq!(
            response_lines(&doc, &op),
            [
                "`200`: OK (`application/json` (array of string), `text/plain`)",
                "`404`: Not found (`application/json` (object{code, message}))",
                "`default`",
            ]
        );
    }

    #[test]
    fn test_request_body_lines() {
        let doc = parse_document(COMPONENTS).unwrap();
        let op = yaml(
            r##"
requestBody:
  content:
    application/json: {schema: {$ref: '#/components/schemas/Error'}}
    multipart/form-data: {}
"##,
        );
        assert_eq!(
            request_body_lines(&doc, &op),
            ["`application/json` `object{code, message}`", "`multipart/form-data`"]
        );
        assert!(request_body_lines(&doc, &yaml("{requestBody: {content: {}}}")).is_empty());
        assert!(request_body_lines(&doc, &yaml("{}")).is_empty());
    }

    fn view_for(src: &str) -> OperationView {
        let doc = parse_document(src).unwrap();
        let records = extract_operations(&doc);
        OperationView::build(&doc, &records[0], &DocsConfig::default())
    }

    #[test]
    fn test_examples_mapping() {
        let view = view_for(
            r#"
paths:
  /models:
    get:
      x-oaiMeta:
        examples:
          request:
            curl: "curl https://api.example.com/models   \n"
            python: print(1)
            ruby: puts 1
          response: '{"object": "list"}'
"#,
        );
        assert!(view.has_examples);
        let langs: Vec<(&str, &str)> = view
            .request_examples
            .iter()
            .map(|e| (e.label.as_str(), e.language.as_str()))
            .collect();
        assert_eq!(langs, [("curl", "bash"), ("python", "python"), ("ruby", "text")]);
        assert_eq!(view.request_examples[0].code, "curl https://api.example.com/models");
        assert!(view.has_response_example);
        assert_eq!(view.response_example, r#"{"object": "list"}"#);
    }

    #[test]
    fn test_examples_bare_request_and_scalar_response() {
        let view = view_for("paths:\n  /a:\n    get:\n      x-oaiMeta:\n        examples:\n          request: echo hi\n");
        assert_eq!(view.request_examples.len(), 1);
        assert_eq!(view.request_examples[0].label, "request");
        assert_eq!(view.request_examples[0].language, "text");
        assert!(!view.has_response_example);

        let view = view_for("paths:\n  /a:\n    get:\n      x-oaiMeta:\n        examples: 42\n");
        assert!(view.has_examples);
        assert!(view.request_examples.is_empty());
        assert_eq!(view.response_example, "42");
    }

    #[test]
    fn test_empty_request_mapping_still_flags_examples() {
        let view = view_for("paths:\n  /a:\n    get:\n      x-oaiMeta:\n        examples:\n          request: {}\n");
        assert!(view.has_examples);
        assert!(view.request_examples.is_empty());
        assert!(!view.has_response_example);
    }

    #[test]
    fn test_no_examples() {
        let view = view_for("paths:\n  /a:\n    get:\n      x-oaiMeta:\n        examples: {}\n");
        assert!(!view.has_examples);
        let view = view_for("paths:\n  /a:\n    get:\n      x-oaiMeta:\n        examples: false\n");
        assert!(!view.has_examples);
    }

    #[test]
    fn test_flags_and_returns() {
        let view = view_for(
            "paths:\n  /a:\n    get:\n      deprecated: true\n      x-oaiMeta:\n        beta: true\n        returns: '  A list.  '\n",
        );
        assert!(view.deprecated);
        assert!(view.beta);
        assert_eq!(view.returns, "A list.");
    }
}
