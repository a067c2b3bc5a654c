use std::collections::BTreeMap;
use std::io::Read;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Columns the dataset must carry, per 100 grams of each food.
const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "protein_g",
    "iron_mg",
    "b12_mcg",
    "omega3_g",
    "cal_kcal",
];

/// Nutrient content for one food per 100 g, also used for accumulated totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector {
    pub protein_g: f64,
    pub iron_mg: f64,
    pub b12_mcg: f64,
    pub omega3_g: f64,
    pub cal_kcal: f64,
}

impl Add for NutrientVector {
    type Output = NutrientVector;

    fn add(self, rhs: NutrientVector) -> NutrientVector {
        NutrientVector {
            protein_g: self.protein_g + rhs.protein_g,
            iron_mg: self.iron_mg + rhs.iron_mg,
            b12_mcg: self.b12_mcg + rhs.b12_mcg,
            omega3_g: self.omega3_g + rhs.omega3_g,
            cal_kcal: self.cal_kcal + rhs.cal_kcal,
        }
    }
}

impl Mul<f64> for NutrientVector {
    type Output = NutrientVector;

    fn mul(self, factor: f64) -> NutrientVector {
        NutrientVector {
            protein_g: self.protein_g * factor,
            iron_mg: self.iron_mg * factor,
            b12_mcg: self.b12_mcg * factor,
            omega3_g: self.omega3_g * factor,
            cal_kcal: self.cal_kcal * factor,
        }
    }
}

/// Raw CSV record; empty numeric cells are treated as zero.
#[derive(Debug, Deserialize)]
struct FoodRow {
    name: String,
    #[serde(default)]
    protein_g: Option<f64>,
    #[serde(default)]
    iron_mg: Option<f64>,
    #[serde(default)]
    b12_mcg: Option<f64>,
    #[serde(default)]
    omega3_g: Option<f64>,
    #[serde(default)]
    cal_kcal: Option<f64>,
}

/// Static reference mapping food name to its per-100g nutrient content.
/// Loaded once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct NutrientTable {
    foods: BTreeMap<String, NutrientVector>,
}

impl NutrientTable {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !headers.iter().any(|h| h == **c))
            .copied()
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("missing columns in dataset: {}", missing.join(", "));
        }

        let mut foods = BTreeMap::new();
        for row in rdr.deserialize::<FoodRow>() {
            let row = row?;
            let name = row.name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            foods.insert(
                name,
                NutrientVector {
                    protein_g: row.protein_g.unwrap_or(0.0),
                    iron_mg: row.iron_mg.unwrap_or(0.0),
                    b12_mcg: row.b12_mcg.unwrap_or(0.0),
                    omega3_g: row.omega3_g.unwrap_or(0.0),
                    cal_kcal: row.cal_kcal.unwrap_or(0.0),
                },
            );
        }
        Ok(Self { foods })
    }

    pub fn get(&self, name: &str) -> Option<&NutrientVector> {
        self.foods.get(name)
    }

    /// All known food names, sorted and deduplicated.
    pub fn food_names(&self) -> Vec<String> {
        self.foods.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,protein_g,iron_mg,b12_mcg,omega3_g,cal_kcal
rice,2.7,0.8,0,0.03,130
egg,13,1.75,0.89,0.1,155
";

    #[test]
    fn parses_per_100g_rows() {
        let table = NutrientTable::from_reader(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(table.len(), 2);
        let rice = table.get("rice").expect("rice present");
        assert_eq!(rice.protein_g, 2.7);
        assert_eq!(rice.cal_kcal, 130.0);
        assert!(table.get("dragonfruit").is_none());
    }

    #[test]
    fn food_names_sorted() {
        let table = NutrientTable::from_reader(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(table.food_names(), vec!["egg", "rice"]);
    }

    #[test]
    fn empty_cells_become_zero() {
        let csv = "\
name,protein_g,iron_mg,b12_mcg,omega3_g,cal_kcal
spinach,2.9,,,,23
";
        let table = NutrientTable::from_reader(csv.as_bytes()).expect("parse");
        let spinach = table.get("spinach").expect("spinach present");
        assert_eq!(spinach.iron_mg, 0.0);
        assert_eq!(spinach.b12_mcg, 0.0);
        assert_eq!(spinach.omega3_g, 0.0);
        assert_eq!(spinach.cal_kcal, 23.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "\
name,protein_g,iron_mg
rice,2.7,0.8
";
        let err = NutrientTable::from_reader(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing columns"));
        assert!(msg.contains("b12_mcg"));
    }

    #[test]
    fn duplicate_names_keep_last_row() {
        let csv = "\
name,protein_g,iron_mg,b12_mcg,omega3_g,cal_kcal
rice,2.7,0.8,0,0.03,130
rice,3.0,0.8,0,0.03,130
";
        let table = NutrientTable::from_reader(csv.as_bytes()).expect("parse");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("rice").unwrap().protein_g, 3.0);
    }

    #[test]
    fn vector_arithmetic() {
        let a = NutrientVector {
            protein_g: 1.0,
            iron_mg: 2.0,
            b12_mcg: 3.0,
            omega3_g: 4.0,
            cal_kcal: 5.0,
        };
        let sum = a + a * 0.5;
        assert_eq!(sum.protein_g, 1.5);
        assert_eq!(sum.cal_kcal, 7.5);
    }
}
