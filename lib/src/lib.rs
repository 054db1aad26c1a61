mod config;
mod equation;
mod error;
mod formula;
mod matrix;
mod solver;
mod table;


pub use config::{BalanceConfig, DEFAULT_ARROW, DEFAULT_MAX_NESTING_DEPTH};
pub use equation::{
    balance, balance_with_config, is_known_element, parse_equation, parse_side, BalancedEquation, Compound, Equation,
    ARROWS,
};
pub use error::{BalanceError, Result, Side};
pub use formula::{ElementSymbol, Formula, MAX_COUNT};
pub use matrix::ConservationMatrix;
pub use solver::{null_space, reduce_row_echelon, solve, swap_rows, CoefficientVector};
pub use table::{cell_text, element_label};

#[cfg(test)]
mod tests {
    use super::*;
    use malachite::num::arithmetic::traits::Gcd;

    fn test_equation(equation: &str, solved_equation: &str) {
        let mut eq = Equation::parse(equation).unwrap();
        eq.solve().unwrap();
        let solution = eq.solution_str().unwrap();

        assert_eq!(solution, solved_equation);
        assert_balanced(&eq);
    }

    fn assert_balanced(eq: &Equation) {
        let coefficients = eq.coefficients().unwrap();
        assert!(coefficients.iter().all(|&c| c > 0));
        assert_eq!(coefficients.iter().fold(0u64, |acc, &c| acc.gcd(c)), 1);

        let (left, right) = coefficients.split_at(eq.reactants().len());
        for element in eq.elements() {
            let side = |compounds: &[Compound], coeffs: &[u64]| {
                compounds
                    .iter()
                    .zip(coeffs)
                    .map(|(c, &k)| u128::from(c.formula().count(element)) * u128::from(k))
                    .sum::<u128>()
            };
            assert_eq!(side(eq.reactants(), left), side(eq.products(), right), "{} not conserved", element);
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let first = balance("KNO3 + C12H22O11", "N2 + CO2 + H2O + K2CO3").unwrap();
        for _ in 0..10 {
            assert_eq!(balance("KNO3 + C12H22O11", "N2 + CO2 + H2O + K2CO3").unwrap(), first);
        }
    }

    #[test]
    fn eq1() {
        test_equation("H2 + O2 -> H2O", "2H2 + O2 -> 2H2O");
    }

    #[test]
    fn eq3() {
        test_equation("[Cr(N2H4CO)6]4[Cr(CN)6]3+KMnO4+H2SO4 -> K2Cr2O7+MnSO4+CO2+KNO3+K2SO4+H2O", "10[Cr(N2H4CO)6]4[Cr(CN)6]3 + 1176KMnO4 + 1399H2SO4 -> 35K2Cr2O7 + 1176MnSO4 + 420CO2 + 660KNO3 + 223K2SO4 + 1879H2O");
    }

    #[test]
    fn eq4() {
        test_equation("P4O10 + H2O -> H3PO4", "P4O10 + 6H2O -> 4H3PO4");
    }

    #[test]
    fn eq6() {
        test_equation("CO2 + H2O -> C6H12O6 + O2", "6CO2 + 6H2O -> C6H12O6 + 6O2");
    }

    #[test]
    fn eq7() {
        test_equation("SiCl4 + H2O -> H4SiO4 + HCl", "SiCl4 + 4H2O -> H4SiO4 + 4HCl");
    }

    #[test]
    fn eq8() {
        test_equation("Al + HCl -> AlCl3 + H2", "2Al + 6HCl -> 2AlCl3 + 3H2");
    }

    #[test]
    fn eq9() {
        test_equation("Na2CO3 + HCl -> NaCl + H2O + CO2", "Na2CO3 + 2HCl -> 2NaCl + H2O + CO2");
    }

    #[test]
    fn eq10() {
        test_equation("C7H6O2 + O2 -> CO2 + H2O", "2C7H6O2 + 15O2 -> 14CO2 + 6H2O");
    }

    #[test]
    fn eq11() {
        test_equation("Fe2(SO4)3 + KOH -> K2SO4 + Fe(OH)3", "Fe2(SO4)3 + 6KOH -> 3K2SO4 + 2Fe(OH)3");
    }

    #[test]
    fn eq12() {
        test_equation("Ca3(PO4)2 + SiO2 -> P4O10 + CaSiO3", "2Ca3(PO4)2 + 6SiO2 -> P4O10 + 6CaSiO3");
    }

    #[test]
    fn eq13() {
        test_equation("KClO3 -> KClO4 + KCl", "4KClO3 -> 3KClO4 + KCl");
    }

    #[test]
    fn eq14() {
        test_equation("Al2(SO4)3 + Ca(OH)2 -> Al(OH)3 + CaSO4", "Al2(SO4)3 + 3Ca(OH)2 -> 2Al(OH)3 + 3CaSO4");
    }

    #[test]
    fn eq15() {
        test_equation("H2SO4 + HI -> H2S + I2 + H2O", "H2SO4 + 8HI -> H2S + 4I2 + 4H2O");
    }

    #[test]
    fn eq16() {
        test_equation("C2H6 + O2 -> CO2 + H2O", "2C2H6 + 7O2 -> 4CO2 + 6H2O");
    }

    #[test]
    fn eq17() {
        test_equation("NaN3 -> Na + N2", "2NaN3 -> 2Na + 3N2");
    }

    #[test]
    fn eq18() {
        test_equation("Na + Fe2O3 -> Na2O + Fe", "6Na + Fe2O3 -> 3Na2O + 2Fe");
    }

    #[test]
    fn eq19() {
        test_equation("Mg + N2 -> Mg3N2", "3Mg + N2 -> Mg3N2");
    }

    #[test]
    fn eq20() {
        test_equation("Na + NH3 -> NaNH2 + H2", "2Na + 2NH3 -> 2NaNH2 + H2");
    }

    #[test]
    fn eq21() {
        test_equation("Na2O + CO2 + H2O -> NaHCO3", "Na2O + 2CO2 + H2O -> 2NaHCO3");
    }

    #[test]
    fn eq22() {
        test_equation("P4S3 + O2 -> P4O6 + SO2", "P4S3 + 6O2 -> P4O6 + 3SO2");
    }

    #[test]
    fn eq23() {
        test_equation("Na3PO4 + CaCl2 -> Ca3(PO4)2 + NaCl", "2Na3PO4 + 3CaCl2 -> Ca3(PO4)2 + 6NaCl");
    }

    #[test]
    fn eq24() {
        test_equation("C8H18 + O2 -> CO2 + H2O", "2C8H18 + 25O2 -> 16CO2 + 18H2O");
    }

    #[test]
    fn eq25() {
        test_equation("C2H6O + O2 -> CO2 + H2O", "C2H6O + 3O2 -> 2CO2 + 3H2O");
    }

    #[test]
    fn eq26() {
        test_equation("Pb(NO3)2 + KI -> PbI2 + KNO3", "Pb(NO3)2 + 2KI -> PbI2 + 2KNO3");
    }

    #[test]
    fn eq27() {
        test_equation("N2O5 -> NO2 + O2", "2N2O5 -> 4NO2 + O2");
    }

    #[test]
    fn eq28() {
        test_equation("KClO3 -> KCl + O2", "2KClO3 -> 2KCl + 3O2");
    }

    #[test]
    fn eq29() {
        test_equation("CO + O2 -> CO2", "2CO + O2 -> 2CO2");
    }

    #[test]
    fn eq30() {
        test_equation("C57H110O6 + O2 -> CO2 + H2O", "2C57H110O6 + 163O2 -> 114CO2 + 110H2O");
    }

    #[test]
    fn eq31() {
        test_equation("K4[Fe(SCN)6] + K2Cr2O7 + H2SO4 -> Fe2(SO4)3 + Cr2(SO4)3 + CO2 + H2O + K2SO4 + KNO3", "6K4[Fe(SCN)6] + 97K2Cr2O7 + 355H2SO4 -> 3Fe2(SO4)3 + 97Cr2(SO4)3 + 36CO2 + 355H2O + 91K2SO4 + 36KNO3");
    }

    #[test]
    fn eq32() {
        test_equation("Al + H2SO4 -> Al2(SO4)3 + H2", "2Al + 3H2SO4 -> Al2(SO4)3 + 3H2");
    }

    #[test]
    fn eq33() {
        test_equation("C7H10N + O2 -> CO2 + H2O + NO2", "2C7H10N + 21O2 -> 14CO2 + 10H2O + 2NO2");
    }

    #[test]
    fn eq34() {
        test_equation("Al(OH)3 + H2SO4 -> Al2(SO4)3 + H2O", "2Al(OH)3 + 3H2SO4 -> Al2(SO4)3 + 6H2O");
    }

    #[test]
    fn eq35() {
        test_equation("BaO + Al -> BaAl4 + Al2O3", "3BaO + 14Al -> 3BaAl4 + Al2O3");
    }

    #[test]
    fn eq36() {
        test_equation("AgN3 -> N2 + Ag", "2AgN3 -> 3N2 + 2Ag");
    }

    #[test]
    fn eq37() {
        test_equation("Pt + HNO3 + HCl -> H2PtCl6 + NO2 + H2O", "Pt + 4HNO3 + 6HCl -> H2PtCl6 + 4NO2 + 4H2O");
    }

    #[test]
    fn eq38() {
        test_equation("LuCl3 + Ca -> Lu + CaCl2", "2LuCl3 + 3Ca -> 2Lu + 3CaCl2");
    }

    #[test]
    fn eq39() {
        test_equation("XeF6 + H2O -> XeO3 + HF", "XeF6 + 3H2O -> XeO3 + 6HF");
    }

    #[test]
    fn eq40() {
        test_equation("Ba2XeO6 + H2SO4 -> BaSO4 + H2O + XeO4", "Ba2XeO6 + 2H2SO4 -> 2BaSO4 + 2H2O + XeO4");
    }

    #[test]
    fn eq41() {
        test_equation("P4O6 + H2O -> H3PO3", "P4O6 + 6H2O -> 4H3PO3");
    }

    #[test]
    fn eq42() {
        test_equation("C6H14 + O2 -> CO2 + H2O", "2C6H14 + 19O2 -> 12CO2 + 14H2O");
    }

    #[test]
    fn eq43() {
        test_equation("MoS2 + O2 -> MoO3 + SO2", "2MoS2 + 7O2 -> 2MoO3 + 4SO2");
    }

    #[test]
    fn eq44() {
        test_equation("K2MnF6 + SbF5 -> KSbF6 + MnF3 + F2", "2K2MnF6 + 4SbF5 -> 4KSbF6 + 2MnF3 + F2");
    }

    #[test]
    fn eq45() {
        test_equation("S + HNO3 -> H2SO4 + NO2 + H2O", "S + 6HNO3 -> H2SO4 + 6NO2 + 2H2O");
    }

    #[test]
    fn eq46() {
        test_equation("Cu + HNO3 -> Cu(NO3)2 + NO + H2O", "3Cu + 8HNO3 -> 3Cu(NO3)2 + 2NO + 4H2O");
    }

    #[test]
    fn eq47() {
        test_equation("CuS + HNO3 -> CuSO4 + NO2 + H2O", "CuS + 8HNO3 -> CuSO4 + 8NO2 + 4H2O");
    }

    #[test]
    fn eq48() {
        test_equation("Cu2S + HNO3 -> Cu(NO3)2 + CuSO4 + NO2 + H2O", "Cu2S + 12HNO3 -> Cu(NO3)2 + CuSO4 + 10NO2 + 6H2O");
    }

    #[test]
    fn eq49() {
        test_equation("NaBr + NaBrO3 + H2SO4 -> Br2 + Na2SO4 + H2O", "5NaBr + NaBrO3 + 3H2SO4 -> 3Br2 + 3Na2SO4 + 3H2O");
    }

    #[test]
    fn eq50() {
        test_equation("KNO3 + C12H22O11 -> N2 + CO2 + H2O + K2CO3", "48KNO3 + 5C12H22O11 -> 24N2 + 36CO2 + 55H2O + 24K2CO3");
    }

    #[test]
    fn unbalanceable() {
        let mut eq = Equation::parse("H2 + O2 -> O2").unwrap();
        assert!(matches!(eq.solve(), Err(BalanceError::NoSolution { .. })));
        assert!(eq.solution_str().is_none());
    }
}
