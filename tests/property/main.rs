//! Property test harness for the rule engine.

mod rules;
