/**
 * Thin rusqlite-backed storage for the HR sample dataset (external
 * collaborator — not part of the dispatcher core). Hosts the schema and
 * the two analytical queries, translated verbatim from the original
 * MySQL CTEs.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use rusqlite::{params, Connection};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::hr::model::Persona;
use crate::hr::sampler::HrDataset;

/***************************************/
/*             Public API              */
/***************************************/
pub struct HrStorage {
    conn: Connection,
}

impl HrStorage {
    pub fn open_in_memory() -> rusqlite::Result<HrStorage> {
        let conn = Connection::open_in_memory()?;
        let storage = HrStorage { conn };
        storage.create_schema()?;
        Ok(storage)
    }

    fn create_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE personas (
                id INTEGER PRIMARY KEY,
                nombre TEXT NOT NULL,
                rut INTEGER NOT NULL,
                dv TEXT NOT NULL,
                nacimiento TEXT NOT NULL,
                defuncion TEXT
            );
            CREATE TABLE conyuges (
                id INTEGER PRIMARY KEY,
                id_persona_1 INTEGER NOT NULL REFERENCES personas(id),
                id_persona_2 INTEGER NOT NULL REFERENCES personas(id),
                celebracion TEXT NOT NULL
            );
            CREATE TABLE hijos (
                id INTEGER PRIMARY KEY,
                id_padre INTEGER NOT NULL REFERENCES personas(id),
                id_hijo INTEGER NOT NULL REFERENCES personas(id)
            );
            ",
        )
    }

    pub fn populate(&mut self, dataset: &HrDataset) -> rusqlite::Result<()> {
        let tx = self.conn.transaction()?;
        for p in &dataset.personas {
            tx.execute(
                "INSERT INTO personas (id, nombre, rut, dv, nacimiento, defuncion) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    p.id,
                    p.nombre,
                    p.rut,
                    p.dv.to_string(),
                    p.nacimiento.to_string(),
                    p.defuncion.map(|d| d.to_string()),
                ],
            )?;
        }
        for c in &dataset.conyuges {
            tx.execute(
                "INSERT INTO conyuges (id, id_persona_1, id_persona_2, celebracion) VALUES (?1, ?2, ?3, ?4)",
                params![c.id, c.id_persona_1, c.id_persona_2, c.celebracion.to_string()],
            )?;
        }
        for h in &dataset.hijos {
            tx.execute(
                "INSERT INTO hijos (id, id_padre, id_hijo) VALUES (?1, ?2, ?3)",
                params![h.id, h.id_padre, h.id_hijo],
            )?;
        }
        tx.commit()
    }

    /// Average number of children per marriage (marriages with none count as zero).
    pub fn avg_children_per_marriage(&self) -> rusqlite::Result<f64> {
        self.conn.query_row(
            "
            WITH first_parent AS (
                SELECT c.id, c.id_persona_1, c.id_persona_2, h.id_hijo
                FROM conyuges AS c
                JOIN hijos AS h ON c.id_persona_1 = h.id_padre
            ),
            second_parent AS (
                SELECT c.id, c.id_persona_1, c.id_persona_2, h.id_hijo
                FROM conyuges AS c
                JOIN hijos AS h ON c.id_persona_2 = h.id_padre
            ),
            marriages_and_children AS (
                SELECT fp.id, fp.id_hijo
                FROM first_parent AS fp
                JOIN second_parent AS sp
                  ON fp.id_persona_1 = sp.id_persona_1
                 AND fp.id_persona_2 = sp.id_persona_2
                 AND fp.id_hijo = sp.id_hijo
            ),
            count_children_by_marriage AS (
                SELECT id, COUNT(*) AS num_children
                FROM marriages_and_children
                GROUP BY id
            )
            SELECT AVG(IFNULL(chbm.num_children, 0))
            FROM conyuges AS c
            LEFT JOIN count_children_by_marriage AS chbm ON c.id = chbm.id
            ",
            [],
            |row| row.get(0),
        )
    }

    /// The persona with the most grandchildren.
    pub fn person_with_max_grandchildren(&self) -> rusqlite::Result<Persona> {
        self.conn.query_row(
            "
            WITH count_grandchildren_by_person AS (
                SELECT grandparents.id_padre, COUNT(*) AS num_grandchildren
                FROM hijos AS grandparents
                JOIN hijos AS parents ON grandparents.id_hijo = parents.id_padre
                GROUP BY grandparents.id_padre
            ),
            winner AS (
                SELECT id_padre
                FROM count_grandchildren_by_person
                WHERE num_grandchildren = (SELECT MAX(num_grandchildren) FROM count_grandchildren_by_person)
                LIMIT 1
            )
            SELECT personas.id, personas.nombre, personas.rut, personas.dv, personas.nacimiento, personas.defuncion
            FROM personas
            JOIN winner ON personas.id = winner.id_padre
            ",
            [],
            Self::row_to_persona,
        )
    }

    fn row_to_persona(row: &rusqlite::Row) -> rusqlite::Result<Persona> {
        let dv: String = row.get(3)?;
        let nacimiento: String = row.get(4)?;
        let defuncion: Option<String> = row.get(5)?;
        Ok(Persona {
            id: row.get(0)?,
            nombre: row.get(1)?,
            rut: row.get(2)?,
            dv: dv.chars().next().unwrap_or('?'),
            nacimiento: nacimiento.parse().expect("stored date is well-formed"),
            defuncion: defuncion.map(|d| d.parse().expect("stored date is well-formed")),
        })
    }
}
