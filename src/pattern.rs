//! Pattern-matching authorization evaluator (spec.md §4.5).

use async_trait::async_trait;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;
use crate::evaluator::Evaluator;
use crate::pipeline::PipelineView;
use crate::selector::{select, stringify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Incl,
    Excl,
    Matches,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonPatternMatchingRuleConfig {
    pub selector: String,
    pub operator: Operator,
    pub value: String,
}

/// The deserializable shape an external config layer builds a
/// [`PatternMatchingEvaluator`] from — its name (keys `auth.metadata` in
/// the authorization context) plus its ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatternMatchingConfig {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<JsonPatternMatchingRuleConfig>,
}

impl From<PatternMatchingConfig> for PatternMatchingEvaluator {
    fn from(config: PatternMatchingConfig) -> Self {
        PatternMatchingEvaluator::new(config.name, config.rules)
    }
}

/// An authorization evaluator configured with a list of rules, all of
/// which must hold against the assembled authorization context.
pub struct PatternMatchingEvaluator {
    name: String,
    rules: Vec<JsonPatternMatchingRuleConfig>,
}

impl PatternMatchingEvaluator {
    pub fn new(name: impl Into<String>, rules: Vec<JsonPatternMatchingRuleConfig>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    fn evaluate_rule(rule: &JsonPatternMatchingRuleConfig, context: &Value) -> Result<bool, CoreError> {
        let actual = select(&rule.selector, context);
        match rule.operator {
            Operator::Eq => Ok(stringify(&actual) == rule.value),
            Operator::Neq => Ok(stringify(&actual) != rule.value),
            Operator::Incl => Ok(actual
                .as_array()
                .is_some_and(|items| items.iter().any(|item| stringify(item) == rule.value))),
            // A missing/absent selector fails membership checks alike (spec.md §4.6), so
            // `excl` only succeeds when `actual` is genuinely a sequence without `value` —
            // not merely "not a sequence containing it".
            Operator::Excl => Ok(actual
                .as_array()
                .is_some_and(|items| !items.iter().any(|item| stringify(item) == rule.value))),
            Operator::Matches => {
                let regex = Regex::new(&rule.value).map_err(|e| CoreError::RegexInvalid(e.to_string()))?;
                Ok(regex.is_match(&stringify(&actual)))
            }
        }
    }
}

#[async_trait]
impl Evaluator for PatternMatchingEvaluator {
    async fn call(&self, view: PipelineView, _cancel: CancellationToken) -> Result<Value, CoreError> {
        let context: Value = serde_json::from_str(&view.authorization_json()?)
            .map_err(|e| CoreError::ContextSerialization(e.to_string()))?;

        for rule in &self.rules {
            if !Self::evaluate_rule(rule, &context)? {
                return Err(CoreError::Unauthorized);
            }
        }

        Ok(Value::Bool(true))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
