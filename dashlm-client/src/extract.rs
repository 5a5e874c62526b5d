//! Few-shot structured extraction
//!
//! An [`Extractor`] turns free text into a flat record whose keys are a
//! fixed [`Schema`]. It sends one JSON-mode completion request holding an
//! instruction message, a block of worked examples and the text itself,
//! then projects the reply onto the schema.
//!
//! # Example
//!
//! ```no_run
//! use dashlm_client::{Example, Extractor, Schema};
//! use dashlm_providers::OpenAI;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), dashlm_core::Error> {
//! let provider = OpenAI::dashscope_from_env()?;
//! let schema = Schema::new(["日期", "股票名称", "开盘价", "收盘价", "成交量"])?;
//! let extractor = Extractor::new(schema)?
//!     .with_task("股票信息")
//!     .example(Example::new(
//!         "2024年4月8日，绿能动力以42.60元低开，最终收报40.85元，成交量萎缩至45万股。",
//!         json!({"日期": "2024-04-08", "股票名称": "绿能动力", "开盘价": "42.60",
//!                "收盘价": "40.85", "成交量": "450000"}),
//!     )?);
//!
//! let result = extractor.extract(&provider, "2024年5月20日，蓝海电子以18.50元开盘...").await?;
//! println!("{}", result.to_json());
//! # Ok(())
//! # }
//! ```

use crate::normalize::NumberNormalizer;
use dashlm_core::{Error, Message, Model, Provider, Request, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

const SYSTEM_TEMPLATE: &str = "system";
const USER_TEMPLATE: &str = "user";

const SYSTEM_PROMPT: &str = "你是一个专业的{{task}}提取助手。请从文本中提取以下字段：\
{{#each fields}}{{#unless @first}},{{/unless}}{{this}}{{/each}}。
返回格式为JSON对象，只包含上述字段；如果原文没有提及，该字段的值为空字符串。\
{{#if normalize}}
带有万、亿等数量单位的数值请换算为纯数字。{{/if}}";

const USER_PROMPT: &str = "{{#if examples}}以下是提取示例：\
{{#each examples}}
输入：{{this.input}}
输出：{{this.output}}
{{/each}}

{{/if}}请提取以下文本的信息：{{text}}";

/// Ordered, non-empty set of field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    /// Create a schema from field names, in order
    ///
    /// Repeated names keep their first position. Fails with
    /// [`Error::Validation`] when the list is empty or a name is blank.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if field.trim().is_empty() {
                return Err(Error::Validation("Schema field names must not be blank".into()));
            }
            if !names.contains(&field) {
                names.push(field);
            }
        }
        if names.is_empty() {
            return Err(Error::Validation("Schema must name at least one field".into()));
        }
        Ok(Self { fields: names })
    }

    /// Field names in order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether `name` is a schema field
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A worked example: source text and the record expected from it
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Source text
    pub input: String,
    /// Expected record, in the author's key order
    pub output: Map<String, Value>,
}

impl Example {
    /// Create an example; `output` must be a JSON object
    pub fn new(input: impl Into<String>, output: Value) -> Result<Self> {
        match output {
            Value::Object(output) => Ok(Self {
                input: input.into(),
                output,
            }),
            other => Err(Error::Validation(format!(
                "Example output must be a JSON object, got {}",
                other
            ))),
        }
    }
}

/// Extracted record, keyed exactly by the schema
///
/// Fields the model left out, set to `null` or to an empty string are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    fields: Vec<(String, Option<String>)>,
}

impl ExtractionResult {
    /// Value of a field, `None` when absent or not in the schema
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Iterate over `(field, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Field names in schema order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields that carry a value
    pub fn filled(&self) -> usize {
        self.fields.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Render as a JSON object, absent fields as empty strings
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    Value::String(value.clone().unwrap_or_default()),
                )
            })
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[derive(Serialize)]
struct RenderedExample {
    input: String,
    output: String,
}

/// Few-shot extractor for one schema
#[derive(Debug, Clone)]
pub struct Extractor {
    schema: Schema,
    examples: Vec<Example>,
    task: String,
    model: Option<Model>,
    json_mode: bool,
    normalizer: Option<NumberNormalizer>,
    templates: Handlebars<'static>,
}

impl Extractor {
    /// Create an extractor with JSON mode and numeric normalization on
    pub fn new(schema: Schema) -> Result<Self> {
        let mut templates = Handlebars::new();
        templates.register_escape_fn(handlebars::no_escape);
        templates
            .register_template_string(SYSTEM_TEMPLATE, SYSTEM_PROMPT)
            .map_err(|e| Error::Configuration(format!("Invalid system prompt template: {}", e)))?;
        templates
            .register_template_string(USER_TEMPLATE, USER_PROMPT)
            .map_err(|e| Error::Configuration(format!("Invalid user prompt template: {}", e)))?;

        Ok(Self {
            schema,
            examples: Vec::new(),
            task: "信息".to_string(),
            model: None,
            json_mode: true,
            normalizer: Some(NumberNormalizer::new()?),
            templates,
        })
    }

    /// Add one worked example
    pub fn example(mut self, example: Example) -> Self {
        for key in example.output.keys() {
            if !self.schema.contains(key) {
                tracing::debug!(key = %key, "example output key is not in the schema");
            }
        }
        self.examples.push(example);
        self
    }

    /// Add several worked examples
    pub fn with_examples(self, examples: impl IntoIterator<Item = Example>) -> Self {
        examples.into_iter().fold(self, Self::example)
    }

    /// Describe what is being extracted, e.g. `股票信息`
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Pin the model instead of using the provider default
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Toggle `response_format = json_object`
    ///
    /// Turn off for services that reject the field.
    pub fn json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Toggle expansion of 万/亿 style quantities
    pub fn normalize_numbers(mut self, enabled: bool) -> Result<Self> {
        self.normalizer = if enabled {
            Some(NumberNormalizer::new()?)
        } else {
            None
        };
        Ok(self)
    }

    /// The schema this extractor projects onto
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Build the instruction and user messages for `text`
    pub fn messages(&self, text: &str) -> Result<Vec<Message>> {
        let system = self
            .templates
            .render(
                SYSTEM_TEMPLATE,
                &json!({
                    "task": self.task,
                    "fields": self.schema.fields(),
                    "normalize": self.normalizer.is_some(),
                }),
            )
            .map_err(|e| Error::Configuration(format!("Failed to render system prompt: {}", e)))?;

        let examples = self
            .examples
            .iter()
            .map(|example| {
                Ok(RenderedExample {
                    input: example.input.clone(),
                    output: serde_json::to_string(&example.output)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let user = self
            .templates
            .render(USER_TEMPLATE, &json!({ "examples": examples, "text": text }))
            .map_err(|e| Error::Configuration(format!("Failed to render user prompt: {}", e)))?;

        Ok(vec![Message::system(system), Message::user(user)])
    }

    /// Build the completion request for `text`
    pub fn request(&self, text: &str) -> Result<Request> {
        let mut builder = Request::builder().messages(self.messages(text)?);
        if let Some(model) = &self.model {
            builder = builder.model(model.clone());
        }
        if self.json_mode {
            builder = builder.json_mode();
        }
        Ok(builder.try_build()?)
    }

    /// Run one extraction against `provider`
    pub async fn extract<P: Provider>(&self, provider: &P, text: &str) -> Result<ExtractionResult> {
        let request = self.request(text)?;
        tracing::debug!(
            fields = self.schema.len(),
            examples = self.examples.len(),
            "extraction request"
        );
        let response = provider.request(request).await?;
        self.parse_reply(&response.content)
    }

    /// Parse a model reply and project it onto the schema
    ///
    /// Fails with [`Error::Parse`] when the reply is not a JSON object.
    pub fn parse_reply(&self, content: &str) -> Result<ExtractionResult> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            Error::parse(
                format!("extraction reply is not valid JSON: {}", e),
                content,
                Some(Box::new(e)),
            )
        })?;
        let Value::Object(mut object) = value else {
            return Err(Error::parse(
                "extraction reply is not a JSON object",
                content,
                None,
            ));
        };

        for key in object.keys().filter(|k| !self.schema.contains(k)) {
            tracing::debug!(key = %key, "dropping field outside the schema");
        }

        let fields = self
            .schema
            .fields()
            .iter()
            .map(|name| {
                let value = object.remove(name).and_then(|v| self.project(v));
                (name.clone(), value)
            })
            .collect();

        Ok(ExtractionResult { fields })
    }

    fn project(&self, value: Value) -> Option<String> {
        let text = match value {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        if text.is_empty() {
            return None;
        }
        Some(match &self.normalizer {
            Some(normalizer) => normalizer.normalize(&text),
            None => text,
        })
    }
}
