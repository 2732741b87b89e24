/// Module to calculate the atomic composition and molar mass of a chemical formula
///
use crate::Kinetics::errors::{KineticsError, KineticsResult};
use log::debug;
use regex::Regex;
use std::collections::HashMap;

/// element symbol and atomic mass, g/mol
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

const fn el(name: &'static str, atomic_mass: f64) -> Element {
    Element { name, atomic_mass }
}

const ELEMENTS: &[Element] = &[
    el("H", 1.008), el("He", 4.0026), el("Li", 6.94), el("Be", 9.0122),
    el("B", 10.81), el("C", 12.011), el("N", 14.007), el("O", 15.999),
    el("F", 18.998), el("Ne", 20.18), el("Na", 22.99), el("Mg", 24.305),
    el("Al", 26.98), el("Si", 28.085), el("P", 30.974), el("S", 32.065),
    el("Cl", 35.45), el("Ar", 39.948), el("K", 39.102), el("Ca", 40.08),
    el("Sc", 44.9559), el("Ti", 47.867), el("V", 50.9415), el("Cr", 51.9961),
    el("Mn", 54.938), el("Fe", 55.845), el("Co", 58.933), el("Ni", 58.69),
    el("Cu", 63.546), el("Zn", 65.38), el("Ga", 69.723), el("Ge", 72.63),
    el("As", 74.922), el("Se", 78.971), el("Br", 79.904), el("Kr", 83.798),
    el("Rb", 85.468), el("Sr", 87.62), el("Y", 88.906), el("Zr", 91.224),
    el("Nb", 92.906), el("Mo", 95.95), el("Ru", 101.07), el("Rh", 102.91),
    el("Pd", 106.42), el("Ag", 107.87), el("Cd", 112.41), el("In", 114.82),
    el("Sn", 118.71), el("Sb", 121.76), el("Te", 127.6), el("I", 126.9),
    el("Xe", 131.29), el("Cs", 132.91), el("Ba", 137.33), el("La", 138.91),
    el("Ce", 140.12), el("W", 183.84), el("Pt", 195.08), el("Au", 196.97),
    el("Hg", 200.59), el("Pb", 207.2), el("Bi", 208.98), el("U", 238.03),
];

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.name == symbol)
        .map(|e| e.atomic_mass)
}

/// removes phase marks like (g), (s), (l), (aq), (cr) from the end of formula
fn filter_phases_marks(formula: &str) -> String {
    let re = Regex::new(r"\((g|s|l|c|cr|aq|liq|gas)\)$").expect("valid regex");
    re.replace(formula, "").to_string()
}

fn count_too_large(formula: &str) -> KineticsError {
    KineticsError::FormulaError(format!("count too large in {}", formula))
}

/// adds atoms to a composition, counts must fit into usize
fn accumulate(
    composition: &mut HashMap<String, usize>,
    element: &str,
    amount: usize,
    formula: &str,
) -> KineticsResult<()> {
    let count = composition.entry(element.to_string()).or_insert(0);
    *count = count
        .checked_add(amount)
        .ok_or_else(|| count_too_large(formula))?;
    Ok(())
}

/// parses chemical formula into {element: number of atoms}.
/// Brackets may be nested and followed by a multiplier: Ca(OH)2, K4(Fe(CN)6)
pub fn parse_formula(formula: &str) -> KineticsResult<HashMap<String, usize>> {
    let formula: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let formula = filter_phases_marks(&formula);
    if formula.is_empty() {
        return Err(KineticsError::FormulaError("empty formula".to_string()));
    }
    let token_re = Regex::new(r"([A-Z][a-z]?)|(\()|(\))|(\d+)").expect("valid regex");

    // stack of compositions: one level per open bracket
    let mut stack: Vec<HashMap<String, usize>> = vec![HashMap::new()];
    // what the next number multiplies: an element or a just-closed bracket group
    let mut last: Option<HashMap<String, usize>> = None;
    let mut position = 0;
    for cap in token_re.captures_iter(&formula) {
        let whole = cap.get(0).expect("group 0 always present");
        if whole.start() != position {
            return Err(KineticsError::FormulaError(format!(
                "unexpected symbol '{}' in {}",
                &formula[position..whole.start()],
                formula
            )));
        }
        position = whole.end();

        if let Some(number) = cap.get(4) {
            let n: usize = number
                .as_str()
                .parse()
                .map_err(|_| KineticsError::FormulaError(format!("bad count in {}", formula)))?;
            if n == 0 {
                return Err(KineticsError::FormulaError(format!(
                    "zero count in {}",
                    formula
                )));
            }
            let Some(group) = last.take() else {
                return Err(KineticsError::FormulaError(format!(
                    "number without element in {}",
                    formula
                )));
            };
            // the group was already added once, add the remaining n-1 copies
            let top = stack.last_mut().expect("stack is never empty");
            for (element, count) in group {
                let copies = count
                    .checked_mul(n - 1)
                    .ok_or_else(|| count_too_large(&formula))?;
                accumulate(top, &element, copies, &formula)?;
            }
            continue;
        }
        if let Some(symbol) = cap.get(1) {
            let symbol = symbol.as_str();
            if atomic_mass(symbol).is_none() {
                return Err(KineticsError::FormulaError(format!(
                    "unknown element {} in {}",
                    symbol, formula
                )));
            }
            let top = stack.last_mut().expect("stack is never empty");
            accumulate(top, symbol, 1, &formula)?;
            last = Some(HashMap::from([(symbol.to_string(), 1)]));
        } else if cap.get(2).is_some() {
            stack.push(HashMap::new());
            last = None;
        } else if cap.get(3).is_some() {
            if stack.len() < 2 {
                return Err(KineticsError::FormulaError(format!(
                    "unbalanced brackets in {}",
                    formula
                )));
            }
            let group = stack.pop().expect("checked above");
            let top = stack.last_mut().expect("stack is never empty");
            for (element, count) in group.iter() {
                accumulate(top, element, *count, &formula)?;
            }
            last = Some(group);
        }
    }
    if position != formula.len() {
        return Err(KineticsError::FormulaError(format!(
            "unexpected symbol '{}' in {}",
            &formula[position..],
            formula
        )));
    }
    if stack.len() != 1 {
        return Err(KineticsError::FormulaError(format!(
            "unbalanced brackets in {}",
            formula
        )));
    }
    let counts = stack.pop().expect("one level left");
    debug!("formula {} parsed into {:?}", formula, counts);
    Ok(counts)
}

/// molar mass of a formula, g/mol, and its atomic composition
pub fn calculate_molar_mass(formula: &str) -> KineticsResult<(f64, HashMap<String, usize>)> {
    let counts = parse_formula(formula)?;
    let mut molar_mass = 0.0;
    for (element, count) in counts.iter() {
        // parse_formula admits only known elements
        let mass = atomic_mass(element).ok_or_else(|| {
            KineticsError::FormulaError(format!("unknown element {}", element))
        })?;
        molar_mass += mass * *count as f64;
    }
    Ok((molar_mass, counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_simple_formula() {
        let counts = parse_formula("H2O").unwrap();
        assert_eq!(counts.get("H"), Some(&2));
        assert_eq!(counts.get("O"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_parse_formula_with_brackets() {
        let counts = parse_formula("Ca(OH)2").unwrap();
        assert_eq!(counts.get("Ca"), Some(&1));
        assert_eq!(counts.get("O"), Some(&2));
        assert_eq!(counts.get("H"), Some(&2));

        let counts = parse_formula("K4(Fe(CN)6)").unwrap();
        assert_eq!(counts.get("K"), Some(&4));
        assert_eq!(counts.get("Fe"), Some(&1));
        assert_eq!(counts.get("C"), Some(&6));
        assert_eq!(counts.get("N"), Some(&6));
    }

    #[test]
    fn test_parse_formula_strips_phase_marks() {
        let counts = parse_formula("NaCl(s)").unwrap();
        assert_eq!(counts.get("Na"), Some(&1));
        assert_eq!(counts.get("Cl"), Some(&1));
        let counts = parse_formula("CO2(aq)").unwrap();
        assert_eq!(counts.get("O"), Some(&2));
    }

    #[test]
    fn test_parse_formula_errors() {
        assert!(matches!(parse_formula("Xx2"), Err(KineticsError::FormulaError(_))));
        assert!(matches!(parse_formula("Ca(OH2"), Err(KineticsError::FormulaError(_))));
        assert!(matches!(parse_formula("CaOH)2"), Err(KineticsError::FormulaError(_))));
        assert!(matches!(parse_formula("2H"), Err(KineticsError::FormulaError(_))));
        assert!(matches!(parse_formula("H-O"), Err(KineticsError::FormulaError(_))));
        assert!(matches!(parse_formula(""), Err(KineticsError::FormulaError(_))));
    }

    #[test]
    fn test_parse_formula_huge_counts() {
        for formula in [
            "(H2)9999999999999999999",
            "((H9999999999)9999999999)9999999999",
            "H18446744073709551615H",
        ] {
            assert!(matches!(
                parse_formula(formula),
                Err(KineticsError::FormulaError(msg)) if msg.contains("count too large")
            ));
        }
        assert!(calculate_molar_mass("(H2)9999999999999999999").is_err());
        // digits beyond usize are not a number at all
        assert!(parse_formula("H99999999999999999999999").is_err());
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (m, _) = calculate_molar_mass("H2O").unwrap();
        assert_relative_eq!(m, 2.0 * 1.008 + 15.999, epsilon = 1e-9);
        // methylene blue cation, common photocatalysis test dye
        let (m, counts) = calculate_molar_mass("C16H18N3S").unwrap();
        assert_eq!(counts.get("N"), Some(&3));
        assert_relative_eq!(m, 284.4, epsilon = 0.1);
    }
}
