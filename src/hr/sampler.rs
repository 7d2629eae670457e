/**
 * Deterministic pseudo-random generator for Personas, Conyuges and Hijos
 * respecting temporal feasibility (adults, alive at event time, child born
 * after marriage).
 *
 * All three samplers draw from one seeded PRNG; `sample_all` fixes the
 * draw order (personas, then conyuges, then hijos) — reproducing a given
 * seed's golden dataset requires calling them in exactly that order.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::hr::model::{Conyuge, HrError, Hijo, Persona};

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";
const DV_ALPHABET: &[u8] = b"123456789k";
const ADULT_AGE_DAYS: i64 = 18 * 365;

/***************************************/
/*             Public API              */
/***************************************/
pub struct HRSampler {
    rng: ChaCha8Rng,
    min_date: NaiveDate,
    max_date: NaiveDate,
    max_rejection_attempts: u32,
}

pub struct HrDataset {
    pub personas: Vec<Persona>,
    pub conyuges: Vec<Conyuge>,
    pub hijos: Vec<Hijo>,
}

impl HRSampler {
    pub fn new(seed: u64, min_date: NaiveDate, max_date: NaiveDate, max_rejection_attempts: u32) -> HRSampler {
        HRSampler {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_date,
            max_date,
            max_rejection_attempts,
        }
    }

    pub fn sample_all(&mut self, n_personas: u32, n_conyuges: u32, n_hijos: u32) -> Result<HrDataset, HrError> {
        let personas = self.sample_personas(n_personas);
        let conyuges = self.sample_conyuges(&personas, n_conyuges)?;
        let hijos = self.sample_hijos(&personas, &conyuges, n_hijos)?;
        Ok(HrDataset { personas, conyuges, hijos })
    }

    pub fn sample_personas(&mut self, n: u32) -> Vec<Persona> {
        (0..n)
            .map(|id| {
                let nombre = self.sample_name();
                let rut = self.rng.gen_range(0..2u32.pow(31));
                let dv = DV_ALPHABET[self.rng.gen_range(0..DV_ALPHABET.len())] as char;
                let nacimiento = self.sample_date(self.min_date, self.max_date);
                let defuncion = self.sample_death_date(nacimiento);
                Persona { id, nombre, rut, dv, nacimiento, defuncion }
            })
            .collect()
    }

    pub fn sample_conyuges(&mut self, personas: &[Persona], n: u32) -> Result<Vec<Conyuge>, HrError> {
        let mut data = Vec::with_capacity(n as usize);
        let mut attempts: u32 = 0;
        while (data.len() as u32) < n {
            if attempts >= self.max_rejection_attempts {
                warn!("conyuge sampling gave up after {attempts} attempts");
                return Err(HrError::RejectionLimitExceeded { n_conyuges: n, attempts });
            }
            attempts += 1;

            let mut pair = [0usize; 2];
            self.choose_two_distinct(personas.len(), &mut pair);
            let p1 = &personas[pair[0]];
            let p2 = &personas[pair[1]];

            if let Some(celebracion) = self.sample_celebration_date(p1, p2) {
                data.push(Conyuge {
                    id: data.len() as u32,
                    id_persona_1: p1.id,
                    id_persona_2: p2.id,
                    celebracion,
                });
            }
        }
        debug!("sampled {} conyuges in {} attempts", data.len(), attempts);
        Ok(data)
    }

    pub fn sample_hijos(&mut self, personas: &[Persona], conyuges: &[Conyuge], n: u32) -> Result<Vec<Hijo>, HrError> {
        let mut data = Vec::with_capacity(2 * n as usize);
        let mut attempts: u32 = 0;
        let target = 2 * n;
        while (data.len() as u32) < target {
            if attempts >= self.max_rejection_attempts {
                warn!("hijo sampling gave up after {attempts} attempts");
                return Err(HrError::RejectionLimitExceededHijos { n_hijos: n, attempts });
            }
            attempts += 1;

            let marriage = &conyuges[self.rng.gen_range(0..conyuges.len())];
            let hijo = &personas[self.rng.gen_range(0..personas.len())];

            if hijo.nacimiento > marriage.celebracion {
                let next_id = data.len() as u32;
                data.push(Hijo {
                    id: next_id,
                    id_padre: marriage.id_persona_1,
                    id_hijo: hijo.id,
                });
                data.push(Hijo {
                    id: next_id + 1,
                    id_padre: marriage.id_persona_2,
                    id_hijo: hijo.id,
                });
            }
        }
        debug!("sampled {} hijo edges in {} attempts", data.len(), attempts);
        Ok(data)
    }

    fn sample_name(&mut self) -> String {
        let length = self.rng.gen_range(2..=100);
        (0..length)
            .map(|_| NAME_ALPHABET[self.rng.gen_range(0..NAME_ALPHABET.len())] as char)
            .collect()
    }

    fn sample_date(&mut self, min_date: NaiveDate, max_date: NaiveDate) -> NaiveDate {
        let span_days = (max_date - min_date).num_days().max(0);
        let offset = self.rng.gen_range(0..=span_days);
        min_date + Days::new(offset as u64)
    }

    fn sample_death_date(&mut self, birth: NaiveDate) -> Option<NaiveDate> {
        let normal = Normal::new(80.0_f64, 10.0_f64).expect("fixed, valid Normal params");
        let years: f64 = normal.sample(&mut self.rng);
        let offset_days = (years * 365.0).round();
        if offset_days < 0.0 {
            return Some(birth);
        }
        let death = birth + Days::new(offset_days as u64);
        if death > self.max_date {
            None
        } else {
            Some(death)
        }
    }

    fn sample_celebration_date(&mut self, p1: &Persona, p2: &Persona) -> Option<NaiveDate> {
        let start = p1.nacimiento.max(p2.nacimiento) + Days::new(ADULT_AGE_DAYS as u64);
        let end = [p1.defuncion, p2.defuncion, Some(self.max_date)]
            .into_iter()
            .flatten()
            .min()?;
        if start < end {
            Some(self.sample_date(start, end))
        } else {
            None
        }
    }

    fn choose_two_distinct(&mut self, n: usize, out: &mut [usize; 2]) {
        // Mirrors `np.random.choice(personas, 2, replace=False)`: draw one
        // index, then a second that cannot repeat the first.
        out[0] = self.rng.gen_range(0..n);
        loop {
            out[1] = self.rng.gen_range(0..n);
            if out[1] != out[0] {
                break;
            }
        }
    }
}
