/// runnable walk-throughs of the reaction bookkeeping API
pub mod kinetics_examples;
