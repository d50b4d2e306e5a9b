use indexmap::IndexMap;
use swmb_core::{ErrorInfo, LabelRule, LabelScheme, ParamValue, SwmbError};
use tracing::warn;

/// Renders one `name<sep>value` label segment under `rule`.
///
/// The value is zero padded to the rule width with a fixed number of decimals,
/// and every `.` is replaced by the scheme's decimal mark.
pub fn format_segment(
    name: &str,
    value: &ParamValue,
    rule: &LabelRule,
    scheme: &LabelScheme,
) -> Result<String, SwmbError> {
    let number = value.as_f64().ok_or_else(|| {
        SwmbError::InvalidLabelValue(
            ErrorInfo::new("swmb_exp.label_value", "labelled parameter must be numeric")
                .with_context("parameter", name)
                .with_context("kind", value.kind()),
        )
    })?;
    let segment = format!(
        "{name}{sep}{number:0width$.decimals$}",
        sep = scheme.separator,
        width = rule.width,
        decimals = rule.decimals,
    );
    Ok(segment.replace('.', &scheme.decimal_mark.to_string()))
}

/// Derives a run label from the labelled sequence parameters, in order.
///
/// Sequence parameters without a matching rule do not contribute.
pub fn derive_label(
    sequence_names: &[&str],
    values: &IndexMap<String, ParamValue>,
    scheme: &LabelScheme,
) -> Result<String, SwmbError> {
    let mut segments = Vec::with_capacity(sequence_names.len());
    for name in sequence_names {
        let (Some(rule), Some(value)) = (scheme.rule_for(name), values.get(*name)) else {
            continue;
        };
        segments.push(format_segment(name, value, rule, scheme)?);
    }
    if segments.is_empty() {
        warn!(parameters = ?sequence_names, "no sequence parameter matches a label rule");
        return Err(SwmbError::InvalidPlan(
            ErrorInfo::new(
                "swmb_exp.empty_label",
                "no sequence-valued parameter matches a label rule",
            )
            .with_hint("add a label rule for at least one swept parameter"),
        ));
    }
    let label = segments.join(&scheme.separator.to_string());
    if let Some(bad) = label.chars().find(|c| !is_label_char(*c)) {
        return Err(SwmbError::InvalidPlan(
            ErrorInfo::new("swmb_exp.label_chars", "run label is not a plain path component")
                .with_context("label", label.as_str())
                .with_context("char", bad.to_string())
                .with_hint("parameter names and label marks may use ASCII letters, digits, `_`, `-` and `+`"),
        ));
    }
    Ok(label)
}

// Labels become directory names and are echoed unquoted by the driver script.
fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
}
