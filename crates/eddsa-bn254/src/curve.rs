//! Baby Jubjub in the `a = -1` twisted Edwards form, the form consensus keys are generated in.
//!
//! The curve equation is `-x² + y² = 1 + d·x²·y²` with `d = -168696/168700` over the BN254
//! scalar field. It is isomorphic to the `a = 1` form in `ark-ed-on-bn254` through
//! `x ↦ x·√-1`, so both forms share `y` coordinates (and thus compressed encodings) but not `x`
//! coordinates. The scalar field and the cofactor are the same.

use ark_ec::{
    models::CurveConfig,
    twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig},
};
use ark_ff::MontFp;

pub use ark_ed_on_bn254::Fr as ScalarField;
/// Coordinates are elements of the BN254 scalar field
pub use ark_bn254::Fr as BaseField;

pub type EdwardsAffine = Affine<BabyJubjubConfig>;
pub type EdwardsProjective = Projective<BabyJubjubConfig>;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct BabyJubjubConfig;

impl CurveConfig for BabyJubjubConfig {
    type BaseField = BaseField;
    type ScalarField = ScalarField;

    /// COFACTOR = 8
    const COFACTOR: &'static [u64] = &[8];

    /// COFACTOR^(-1) mod l
    const COFACTOR_INV: ScalarField =
        MontFp!("2394026564107420727433200628387514462817212225638746351800188703329891451411");
}

impl TECurveConfig for BabyJubjubConfig {
    /// COEFF_A = -1
    const COEFF_A: BaseField =
        MontFp!("21888242871839275222246405745257275088548364400416034343698204186575808495616");

    #[inline(always)]
    fn mul_by_a(elem: Self::BaseField) -> Self::BaseField {
        -elem
    }

    /// COEFF_D = -168696/168700 mod q
    const COEFF_D: BaseField =
        MontFp!("12181644023421730124874158521699555681764249180949974110617291017600649128846");

    const GENERATOR: EdwardsAffine = EdwardsAffine::new_unchecked(GENERATOR_X, GENERATOR_Y);

    type MontCurveConfig = BabyJubjubConfig;
}

impl MontCurveConfig for BabyJubjubConfig {
    /// COEFF_A = 2(a + d)/(a - d) = 168698
    const COEFF_A: BaseField = MontFp!("168698");
    /// COEFF_B = 4/(a - d) = -168700 mod q
    const COEFF_B: BaseField =
        MontFp!("21888242871839275222246405745257275088548364400416034343698204186575808326917");

    type TECurveConfig = BabyJubjubConfig;
}

const GENERATOR_X: BaseField =
    MontFp!("9671717474070082183213120605117400219616337014328744928644933853176787189663");

const GENERATOR_Y: BaseField =
    MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203");
