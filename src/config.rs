//! Extrapolation scheme catalogue
//!
//! Each supported `(order, cores)` pair maps to a fixed sub-step count
//! sequence and a matching set of extrapolation weights, derived offline
//! together with the scheme's normalized imaginary-axis stability
//! boundary (ISBn). The weights are rational; they are written here as
//! exact numerator/denominator quotients evaluated in double precision,
//! which keeps each weight correctly rounded for the reduction.

use crate::error::Error;

/// A precomputed extrapolation scheme.
///
/// `step_counts[j]` is the number of subintervals used by the j-th GBS
/// sub-integration and `weights[j]` its coefficient in the final
/// combination. The two slices always have equal length, every count is
/// even and at least 2, and the weights sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheme {
    pub order: usize,
    pub cores: usize,
    /// Normalized imaginary-axis stability boundary. Advisory only: it
    /// bounds `|lambda * dt|` per unit of sub-step work for imaginary-axis
    /// eigenvalues, useful when picking `dt` for method-of-lines problems.
    pub isbn: f32,
    pub step_counts: &'static [usize],
    pub weights: &'static [f64],
}

impl Scheme {
    /// Look up the scheme for an `(order, cores)` pair.
    ///
    /// The catalogue is the full admissible set; any other pair is
    /// rejected here, before any thread or buffer is created.
    pub fn lookup(order: usize, cores: usize) -> Result<&'static Scheme, Error> {
        SCHEMES
            .iter()
            .find(|s| s.order == order && s.cores == cores)
            .ok_or(Error::UnsupportedScheme { order, cores })
    }

    /// Number of GBS sub-integrations per macro-step
    pub fn num_steppers(&self) -> usize {
        self.step_counts.len()
    }
}

const W_ORDER8_CORES3: [f64; 4] = [
    -1.0 / 498960.0,
    65536.0 / 9639.0,
    -531441.0 / 25840.0,
    250000.0 / 16929.0,
];

const W_ORDER8_CORES6: [f64; 11] = [
    -32952289146985386285870523118228405533963.0 / 8936455970950449255004500793755553651752960000.0,
    577598451788090848795408620332945866052063.0 / 7941577083559481271537202853825736155366400000.0,
    85250432905463981456535914913119571901637.0 / 122585129917015764814876554098155742822400000.0,
    1677712357266484804784340039643670407130779.0 / 200176613749290063312100817780124401799266304.0,
    2165.0 / 767488.0,
    13805.0 / 611712.0,
    4553.0 / 72080.0,
    14503.0 / 66520.0,
    27058.0 / 7627.0,
    -86504.0 / 5761.0,
    40916.0 / 3367.0,
];

const W_ORDER8_CORES8: [f64; 15] = [
    -298857882660976887631476729981565763568862608650111.0
        / 418309165211319520505929581345807932301941968522444800000.0,
    54841752514603990885070634946141665271319680054382001869.0
        / 7796886807193233666234782137510621223379391720980480000.0,
    -6653387365673258947809103108875129803987861502988566763111.0
        / 258933840128714385112278118363748576398397951218483200000.0,
    54824130826438857272172198804804549641875992497090297.0
        / 2867295913488162504174863944731843756709312047611904.0,
    6833.0 / 476577792.0,
    10847.0 / 91078656.0,
    15235.0 / 34643968.0,
    383.0 / 321152.0,
    543.0 / 198784.0,
    9947.0 / 1741056.0,
    6243.0 / 543104.0,
    6875.0 / 296192.0,
    1401.0 / 28496.0,
    17713.0 / 152688.0,
    6375.0 / 19264.0,
];

const W_ORDER12_CORES4: [f64; 6] = [
    -1.0 / 157172400.0,
    4096.0 / 155925.0,
    -59049.0 / 15925.0,
    282475249.0 / 15752880.0,
    -4194304.0 / 178605.0,
    9765625.0 / 954261.0,
];

const W_ORDER12_CORES8: [f64; 15] = [
    -1703338201142081344537976944145527211643949659234240721389419.0
        / 23648864513368626787371236562816879339803777703368508907192320000000000.0,
    28566269141029842679611128435317644430416456404930682840133.0
        / 1235974431889711160110009091223554591673172898357667840000000000.0,
    1661823701099033749417849761031734684833334503871915993221173.0
        / 16039458446054067082385395561773359826518343984165155963236515840.0,
    297002124618857676974925717053765105019453996390390125558609.0
        / 160179791893258872271743935365682835875612617239142743750000000.0,
    -5460019744535790351900106662607930219497507008045052153266932061.0
        / 109934733569605065449891190520737372992080772483328000000000000.0,
    4518788471550054059819510090434891452487764271627191207619322033987247547.0
        / 24806501237799258867871926464493230076717249339197736615936000000000000.0,
    235.0 / 21030240256.0,
    4147.0 / 1612709888.0,
    11521.0 / 39731200.0,
    2375.0 / 3528704.0,
    6435.0 / 708736.0,
    1291.0 / 15780.0,
    11311.0 / 4672.0,
    -180864.0 / 751.0,
    222080.0 / 2079.0,
];

const W_ORDER16_CORES5: [f64; 8] = [
    -1.0 / 365783040000.0,
    4194304.0 / 456080625.0,
    -6103515625.0 / 11955879936.0,
    544195584.0 / 74449375.0,
    -678223072849.0 / 17079828480.0,
    68719476736.0 / 749962395.0,
    -2541865828329.0 / 31682560000.0,
    379749833583241.0 / 16878274560000.0,
];

/// The full admissible scheme catalogue
pub static SCHEMES: [Scheme; 6] = [
    Scheme {
        order: 8,
        cores: 3,
        isbn: 0.5799,
        step_counts: &[2, 16, 18, 20],
        weights: &W_ORDER8_CORES3,
    },
    Scheme {
        order: 8,
        cores: 6,
        isbn: 0.7675,
        step_counts: &[2, 4, 6, 10, 8, 12, 14, 16, 18, 20, 22],
        weights: &W_ORDER8_CORES6,
    },
    Scheme {
        order: 8,
        cores: 8,
        isbn: 0.8176,
        step_counts: &[2, 26, 28, 30, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24],
        weights: &W_ORDER8_CORES8,
    },
    Scheme {
        order: 12,
        cores: 4,
        isbn: 0.4515,
        step_counts: &[2, 8, 12, 14, 16, 20],
        weights: &W_ORDER12_CORES4,
    },
    Scheme {
        order: 12,
        cores: 8,
        isbn: 0.7116,
        step_counts: &[2, 8, 10, 16, 24, 26, 4, 6, 12, 14, 18, 20, 22, 28, 30],
        weights: &W_ORDER12_CORES8,
    },
    Scheme {
        order: 16,
        cores: 5,
        isbn: 0.4162,
        step_counts: &[2, 8, 10, 12, 14, 16, 18, 22],
        weights: &W_ORDER16_CORES5,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weights_sum_to_one() {
        for scheme in &SCHEMES {
            let sum: f64 = scheme.weights.iter().sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_step_counts_match_weights() {
        for scheme in &SCHEMES {
            assert_eq!(scheme.step_counts.len(), scheme.weights.len());
            assert!(scheme.num_steppers() >= 4);
        }
    }

    #[test]
    fn test_step_counts_even_and_at_least_two() {
        for scheme in &SCHEMES {
            for &n in scheme.step_counts {
                assert!(n >= 2, "scheme ({},{})", scheme.order, scheme.cores);
                assert_eq!(n % 2, 0, "scheme ({},{})", scheme.order, scheme.cores);
            }
        }
    }

    #[test]
    fn test_step_counts_are_distinct() {
        // bin values are mapped back to stepper indices by value search,
        // which relies on this
        for scheme in &SCHEMES {
            let mut sorted = scheme.step_counts.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), scheme.step_counts.len());
        }
    }

    #[test]
    fn test_lookup_supported() {
        for (order, cores) in [(8, 3), (8, 6), (8, 8), (12, 4), (12, 8), (16, 5)] {
            let scheme = Scheme::lookup(order, cores).unwrap();
            assert_eq!(scheme.order, order);
            assert_eq!(scheme.cores, cores);
            assert!(scheme.isbn > 0.0);
        }
    }

    #[test]
    fn test_lookup_unsupported() {
        for (order, cores) in [(8, 1), (8, 4), (10, 3), (12, 3), (16, 8), (0, 0)] {
            assert_eq!(
                Scheme::lookup(order, cores),
                Err(Error::UnsupportedScheme { order, cores })
            );
        }
    }
}
