pub fn solve_response_fixture() -> &'static str {
    return r#"
{
  "steps": [
    "A∧B is satisfiable with A=T,B=T",
    "SATISFIABLE"
  ],
  "result": true
}
"#
    .trim();
}

pub fn history_response_fixture() -> &'static str {
    return r#"
{
  "formulas": [
    { "premise": "(p∨q)∧(¬p∨r)", "conclusion": "q∨r" },
    { "premise": "p∨q", "conclusion": "p" },
    { "premise": "(p∨q∨r)∧(¬p∨s∨t)∧(¬s∨y)", "conclusion": null }
  ]
}
"#
    .trim();
}
