/**
 * HR sample entities: person / marriage / parent-child edge.
 *
 * Table layout mirrors the external relational schema verbatim (column
 * order matters for `hr::storage`): `personas(id, nombre, rut, dv,
 * nacimiento, defuncion)`, `conyuges(id, id_persona_1, id_persona_2,
 * celebracion)`, `hijos(id, id_padre, id_hijo)`.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::NaiveDate;
use thiserror::Error;

/***************************************/
/*             Public API              */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub id: u32,
    pub nombre: String,
    pub rut: u32,
    pub dv: char,
    pub nacimiento: NaiveDate,
    pub defuncion: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conyuge {
    pub id: u32,
    pub id_persona_1: u32,
    pub id_persona_2: u32,
    pub celebracion: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hijo {
    pub id: u32,
    pub id_padre: u32,
    pub id_hijo: u32,
}

#[derive(Error, Debug)]
pub enum HrError {
    #[error("could not sample {n_conyuges} conyuges after {attempts} attempts (density too low)")]
    RejectionLimitExceeded { n_conyuges: u32, attempts: u32 },

    #[error("could not sample {n_hijos} hijo pairs after {attempts} attempts (density too low)")]
    RejectionLimitExceededHijos { n_hijos: u32, attempts: u32 },
}
