use super::{EvalError, Evaluator, Variables};
use log::debug;

/// Parenthesis-free text produced by [`Evaluator::flatten`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened {
    pub text: String,
    /// Number of substitution passes that ran
    pub passes: usize,
}

impl<'v, V: Variables + ?Sized> Evaluator<'v, V> {
    /// Replace parenthesized groups by their values, innermost first.
    ///
    /// The text is prefixed with `0+` and every `(` becomes `(0+`, so a sign
    /// at the start of a group always has a left operand. Each pass evaluates
    /// every innermost group and substitutes the result for all copies of the
    /// group text.
    pub fn flatten(&mut self, expr: &str) -> Result<Flattened, EvalError> {
        let mut text = format!("0+{}", expr.replace('(', "(0+"));
        let mut passes = 0;

        loop {
            let groups = innermost_groups(&text);
            if groups.is_empty() {
                break;
            }
            passes += 1;

            for group in groups {
                let inner = &group[1..group.len() - 1];
                let value = self.eval_flat(inner)?;
                text = text.replace(&group, &value.to_string());
            }
            debug!("flatten pass {}: {}", passes, text);
        }

        if text.contains(|c: char| c == '(' || c == ')') {
            return Err(EvalError::MalformedExpression(format!(
                "unbalanced parentheses in {}",
                text
            )));
        }

        Ok(Flattened { text, passes })
    }
}

/// Every `(...)` span with no `(` inside, left to right, without overlap
fn innermost_groups(text: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut open = None;

    for (i, c) in text.char_indices() {
        match c {
            '(' => open = Some(i),
            ')' => {
                if let Some(start) = open.take() {
                    groups.push(text[start..=i].to_string());
                }
            }
            _ => {}
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn flatten(expr: &str) -> Result<Flattened, EvalError> {
        let vars: HashMap<String, String> = HashMap::new();
        Evaluator::new(&vars).flatten(expr)
    }

    #[test]
    fn groups_are_innermost_only() {
        assert_eq!(innermost_groups("(1+(2*3))+(4)"), vec!["(2*3)", "(4)"]);
        assert!(innermost_groups("1+2").is_empty());
        assert!(innermost_groups(")(").is_empty());
    }

    #[test]
    fn no_parentheses_needs_no_pass() {
        let flat = flatten("1+2").unwrap();
        assert_eq!(flat.text, "0+1+2");
        assert_eq!(flat.passes, 0);
    }

    #[test]
    fn nested_groups_take_one_pass_per_level() {
        let flat = flatten("((1+2))").unwrap();
        assert_eq!(flat.text, "0+3");
        assert_eq!(flat.passes, 2);
    }

    #[test]
    fn sibling_groups_share_a_pass() {
        let flat = flatten("(1+1)*(2+2)").unwrap();
        assert_eq!(flat.text, "0+2*4");
        assert_eq!(flat.passes, 1);
    }

    #[test]
    fn negative_results_are_substituted_with_sign() {
        let flat = flatten("2*(3-5)").unwrap();
        assert_eq!(flat.text, "0+2*-2");
    }

    #[test]
    fn negated_negative_group_leaves_sign_run() {
        let flat = flatten("-(2-5)").unwrap();
        assert_eq!(flat.text, "0+--3");
        assert_eq!(flat.passes, 1);
    }

    #[test]
    fn unbalanced_text_is_malformed() {
        assert!(matches!(flatten("(1+2"), Err(EvalError::MalformedExpression(_))));
        assert!(matches!(flatten("1+2)"), Err(EvalError::MalformedExpression(_))));
    }
}
