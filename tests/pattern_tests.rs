use chrono::NaiveDate;
use pattern_logger::{compile, record, Clock, Directive, FixedClock, Record, Step};
use proptest::prelude::*;

fn clock() -> FixedClock {
    let at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_milli_opt(14, 30, 9, 500))
        .unwrap();
    FixedClock::new(at)
}

// One extra field at most, so %M output does not depend on map order.
fn sample_record() -> Record {
    record! {
        "level" => "ERROR",
        "levelValue" => 4,
        "source" => "/src/app/db.rs:310",
        "instanceID" => "i-0abc",
        "deployEnv" => "staging",
        "zone" => "eu-west-1a",
        "appID" => "ledger",
        "time" => "2025-06-01 14:30:09.000",
        "log" => "connection reset",
        "peer" => "10.0.0.7",
    }
}

/// Reads the pattern character by character without building a plan.
fn interpret(format: &str, record: &Record, clock: &dyn Clock) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' {
            if let Some(d) = chars.get(i + 1).copied().and_then(Directive::from_char) {
                out.push_str(&d.resolve(record, clock));
                i += 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn render(format: &str, record: &Record, clock: &dyn Clock) -> String {
    let mut out = String::new();
    compile(format).write_to(&mut out, record, clock);
    out
}

#[test]
fn test_every_directive_against_interpretation() {
    let rec = sample_record();
    let c = clock();
    let format = "%T|%t|%D|%d|%L|%f|%i|%e|%z|%S|%s|%M";
    assert_eq!(render(format, &rec, &c), interpret(format, &rec, &c));
    assert_eq!(
        render(format, &rec, &c),
        "14:30:09.500|14:30|2025/06/01|06/01|ERROR|/src/app/db.rs:310|i-0abc|staging|eu-west-1a\
         |/src/app/db.rs:310|db.rs:310|peer=10.0.0.7 connection reset"
    );
}

#[test]
fn test_malformed_sequences_render_literally() {
    let rec = sample_record();
    let c = clock();
    assert_eq!(render("%Q", &rec, &c), "%Q");
    assert_eq!(render("level %L %", &rec, &c), "level ERROR %");
    assert_eq!(render("%%%", &rec, &c), "%%%");
    assert_eq!(render("%%L", &rec, &c), "%ERROR");
}

#[test]
fn test_one_step_per_directive_occurrence() {
    let plan = compile("%L%L %L");
    let directives = plan
        .steps()
        .iter()
        .filter(|s| matches!(s, Step::Directive(Directive::Level)))
        .count();
    assert_eq!(directives, 3);
    assert_eq!(plan.len(), 4);
}

proptest! {
    #[test]
    fn prop_literal_passthrough(format in "[^%]{0,64}") {
        let rec = sample_record();
        prop_assert_eq!(render(&format, &rec, &clock()), format.clone());
        prop_assert!(compile(&format).len() <= 1);
    }

    #[test]
    fn prop_compiled_matches_interpretation(format in "([%]|[TtDdLfiezSsMQx ]|[a-z:\\[\\]é→]){0,48}") {
        let rec = sample_record();
        let c = clock();
        prop_assert_eq!(render(&format, &rec, &c), interpret(&format, &rec, &c));
    }

    #[test]
    fn prop_plan_is_compact(format in "([%]|[LMsQ]|[ab ]){0,48}") {
        let plan = compile(&format);
        for pair in plan.steps().windows(2) {
            let both_literal = matches!(pair, [Step::Literal(_), Step::Literal(_)]);
            prop_assert!(!both_literal, "adjacent literals in {:?}", plan.steps());
        }
        for step in plan.steps() {
            if let Step::Literal(text) = step {
                prop_assert!(!text.is_empty());
            }
        }
    }
}
