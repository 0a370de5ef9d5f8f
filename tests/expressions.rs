use serde_json::{json, Map, Value};
use vld_spec::expr::{evaluate, tokenize, CmpOp, Token};

fn ctx(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("context must be an object, got {}", other),
    }
}

fn eval(expr: &str, context: Value) -> bool {
    evaluate(expr, &ctx(context)).unwrap_or_else(|e| panic!("{:?} failed: {}", expr, e))
}

fn eval_err(expr: &str, context: Value) -> String {
    match evaluate(expr, &ctx(context)) {
        Ok(v) => panic!("{:?} unexpectedly evaluated to {}", expr, v),
        Err(e) => e.to_string(),
    }
}

fn lit(text: &str) -> Token {
    Token::Literal(text.to_string())
}

// ---------------------------------------------------------------------------
// tokenizer
// ---------------------------------------------------------------------------

#[test]
fn tokenize_comparison() {
    assert_eq!(
        tokenize("count >= 10").unwrap(),
        vec![lit("count"), Token::Op(CmpOp::Ge), lit("10")]
    );
}

#[test]
fn tokenize_operators_without_spaces() {
    assert_eq!(
        tokenize("a==b").unwrap(),
        vec![lit("a"), Token::Op(CmpOp::Eq), lit("b")]
    );
    assert_eq!(
        tokenize("a!=b<=c<d>e>=f").unwrap(),
        vec![
            lit("a"),
            Token::Op(CmpOp::Ne),
            lit("b"),
            Token::Op(CmpOp::Le),
            lit("c"),
            Token::Op(CmpOp::Lt),
            lit("d"),
            Token::Op(CmpOp::Gt),
            lit("e"),
            Token::Op(CmpOp::Ge),
            lit("f"),
        ]
    );
}

#[test]
fn tokenize_keywords_case_insensitive() {
    assert_eq!(
        tokenize("a and b Or c").unwrap(),
        vec![lit("a"), Token::And, lit("b"), Token::Or, lit("c")]
    );
}

#[test]
fn tokenize_keywords_only_at_word_boundaries() {
    assert_eq!(
        tokenize("android OR order AND ORACLE").unwrap(),
        vec![lit("android"), Token::Or, lit("order"), Token::And, lit("ORACLE")]
    );
    assert_eq!(tokenize("sandbox").unwrap(), vec![lit("sandbox")]);
}

#[test]
fn tokenize_keywords_next_to_parentheses() {
    assert_eq!(
        tokenize("(a)AND(b)").unwrap(),
        vec![
            Token::LParen,
            lit("a"),
            Token::RParen,
            Token::And,
            Token::LParen,
            lit("b"),
            Token::RParen,
        ]
    );
}

#[test]
fn tokenize_quoted_literals() {
    assert_eq!(
        tokenize(r#"name == "John AND Jane""#).unwrap(),
        vec![lit("name"), Token::Op(CmpOp::Eq), lit(r#""John AND Jane""#)]
    );
    assert_eq!(
        tokenize("msg == 'it''s'").unwrap(),
        vec![lit("msg"), Token::Op(CmpOp::Eq), lit("'it''s'")]
    );
}

#[test]
fn tokenize_rejects_empty_input() {
    assert!(tokenize("").is_err());
    assert!(tokenize("   \t\n").is_err());
}

#[test]
fn tokenize_rejects_unterminated_quote() {
    let err = tokenize(r#"name == "John"#).unwrap_err();
    assert!(err.to_string().contains("unterminated"));
}

// ---------------------------------------------------------------------------
// AND / OR / parentheses
// ---------------------------------------------------------------------------

#[test]
fn and_truth_table() {
    for (a, b, expected) in [
        (true, true, true),
        (true, false, false),
        (false, true, false),
        (false, false, false),
    ] {
        assert_eq!(
            eval("enabled AND active", json!({"enabled": a, "active": b})),
            expected
        );
    }
}

#[test]
fn or_truth_table() {
    for (a, b, expected) in [
        (true, true, true),
        (true, false, true),
        (false, true, true),
        (false, false, false),
    ] {
        assert_eq!(
            eval("enabled OR active", json!({"enabled": a, "active": b})),
            expected
        );
    }
}

#[test]
fn and_binds_tighter_than_or() {
    // a OR (b AND c)
    assert!(eval("a OR b AND c", json!({"a": true, "b": false, "c": false})));
    // (a AND b) OR c
    assert!(eval("a AND b OR c", json!({"a": false, "b": false, "c": true})));
    assert!(!eval("a AND b OR c", json!({"a": true, "b": false, "c": false})));
}

#[test]
fn parentheses_override_precedence() {
    assert!(eval("(a OR b) AND c", json!({"a": true, "b": false, "c": true})));
    assert!(!eval("(a OR b) AND c", json!({"a": true, "b": false, "c": false})));
    assert!(eval(
        "((a OR b) AND (c OR d))",
        json!({"a": false, "b": true, "c": false, "d": true})
    ));
}

#[test]
fn comparisons_combined() {
    let data = json!({"count": 5, "status": "active"});
    assert!(eval(r#"count > 0 AND status == "active""#, data.clone()));
    assert!(!eval(r#"count > 10 AND status == "active""#, data.clone()));
    assert!(eval(r#"count > 10 OR status == "active""#, data.clone()));
    assert!(!eval(r#"count > 10 OR status == "inactive""#, data));
}

#[test]
fn complex_expression() {
    let expr = r#"(age < 18 AND country == "US") OR requireVerification == true"#;
    assert!(eval(expr, json!({"age": 16, "country": "US"})));
    assert!(!eval(expr, json!({"age": 16, "country": "DE"})));
    assert!(eval(expr, json!({"age": 30, "requireVerification": true})));
    assert!(!eval(expr, json!({})));
}

// ---------------------------------------------------------------------------
// bare literals
// ---------------------------------------------------------------------------

#[test]
fn bare_boolean_text() {
    assert!(eval("true", json!({})));
    assert!(!eval("false", json!({})));
    assert!(eval("false OR true", json!({})));
}

#[test]
fn bare_field_truthiness() {
    let data = json!({"flag": true, "off": false, "name": "x", "zero": 0, "empty": "", "nothing": null});
    assert!(eval("flag", data.clone()));
    assert!(!eval("off", data.clone()));
    // Present non-boolean values only need to exist.
    assert!(eval("name", data.clone()));
    assert!(eval("zero", data.clone()));
    assert!(eval("empty", data.clone()));
    assert!(!eval("nothing", data.clone()));
    assert!(!eval("missing", data));
}

// ---------------------------------------------------------------------------
// comparisons
// ---------------------------------------------------------------------------

#[test]
fn equality_with_literal_kinds() {
    let data = json!({"s": "abc", "n": 3, "f": 2.5, "b": true, "z": null});
    assert!(eval(r#"s == "abc""#, data.clone()));
    assert!(eval("s == 'abc'", data.clone()));
    assert!(eval("s == abc", data.clone()));
    assert!(eval("n == 3", data.clone()));
    assert!(eval("n == 3.0", data.clone()));
    assert!(eval("f == 2.5", data.clone()));
    assert!(eval("b == true", data.clone()));
    assert!(eval("b != false", data.clone()));
    assert!(eval("z == null", data.clone()));
    assert!(eval("z == nil", data.clone()));
    assert!(eval("s != null", data.clone()));
    // Kinds must match apart from numbers.
    assert!(!eval(r#"n == "3""#, data.clone()));
    assert!(!eval("b == 1", data));
}

#[test]
fn quoted_strings_unescape_doubled_quotes() {
    let data = json!({"msg": "it's", "q": "say \"hi\""});
    assert!(eval("msg == 'it''s'", data.clone()));
    assert!(eval(r#"q == "say ""hi""""#, data));
}

#[test]
fn quoted_keywords_are_values() {
    let data = json!({"status": "AND"});
    assert!(eval(r#"status == "AND""#, data));
}

#[test]
fn ordering_operators() {
    let data = json!({"n": 10});
    assert!(eval("n > 9", data.clone()));
    assert!(!eval("n > 10", data.clone()));
    assert!(eval("n >= 10", data.clone()));
    assert!(eval("n < 10.5", data.clone()));
    assert!(eval("n <= 10", data.clone()));
    assert!(!eval("n < -1", data));
}

#[test]
fn missing_fields() {
    let empty = json!({});
    assert!(eval("missing == null", empty.clone()));
    assert!(eval("missing == nil", empty.clone()));
    assert!(!eval("missing == 0", empty.clone()));
    assert!(!eval("missing != null", empty.clone()));
    assert!(!eval("missing != 5", empty.clone()));
    // Ordering against a missing field is false, never an error.
    assert!(!eval("missing > 0", empty.clone()));
    assert!(!eval(r#"missing < "x""#, empty));
}

#[test]
fn present_null_compares_as_null() {
    let data = json!({"x": null});
    assert!(eval("x == null", data.clone()));
    assert!(!eval("x != null", data.clone()));
    assert!(!eval("x == 0", data));
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn empty_expression() {
    assert_eq!(eval_err("", json!({})), "empty expression");
    assert_eq!(eval_err("  ", json!({})), "empty expression");
}

#[test]
fn dangling_operators() {
    assert!(eval_err("a AND", json!({"a": true})).contains("unexpected end"));
    assert!(eval_err("OR a", json!({"a": true})).contains("unexpected token"));
    assert!(eval_err("a ==", json!({"a": 1})).contains("missing its right operand"));
    assert!(eval_err("a == )", json!({"a": 1})).contains("expects a value"));
}

#[test]
fn unbalanced_parentheses() {
    assert!(eval_err("(a AND b", json!({"a": true, "b": true})).contains("unbalanced"));
    assert!(eval_err("a AND b)", json!({"a": true, "b": true})).contains("unbalanced"));
    assert!(eval_err("()", json!({})).contains("unexpected token"));
}

#[test]
fn nesting_depth_is_capped() {
    let shallow = format!("{}a{}", "(".repeat(64), ")".repeat(64));
    assert!(eval(&shallow, json!({"a": true})));

    let deep = format!("{}a{}", "(".repeat(65), ")".repeat(65));
    assert_eq!(eval_err(&deep, json!({"a": true})), "expression nested too deeply");

    let huge = format!("{}a", "(".repeat(100_000));
    assert_eq!(eval_err(&huge, json!({})), "expression nested too deeply");
}

#[test]
fn trailing_tokens() {
    assert!(eval_err("a b", json!({"a": true})).contains("unexpected token"));
    assert!(eval_err("a == 1 2", json!({"a": 1})).contains("unexpected token"));
}

#[test]
fn ordering_requires_numbers() {
    let err = eval_err(r#"name > "a""#, json!({"name": "b"}));
    assert!(err.contains("cannot compare non-numeric values"));
    let err = eval_err("n > abc", json!({"n": 1}));
    assert!(err.contains("cannot compare non-numeric values"));
}

#[test]
fn both_sides_are_evaluated() {
    // The right side errors even though the left already decides the result.
    let data = json!({"a": true, "name": "x"});
    assert!(eval_err("a OR name > 1", data.clone()).contains("cannot compare"));
    let data = json!({"a": false, "name": "x"});
    assert!(eval_err("a AND name > 1", data).contains("cannot compare"));
}
