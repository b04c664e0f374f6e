// src/models/record.rs

//! Result record with the archive's fixed 24-field schema.

/// Number of fields in the result schema.
pub const FIELD_COUNT: usize = 24;

/// Column names, in the order the archive's result table lays them out.
/// Also used verbatim as the CSV header row.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "first_name",
    "last_name",
    "sex_age",
    "bib",
    "team",
    "country",
    "country_abbrev",
    "place",
    "place_gender",
    "place_age",
    "gun_time",
    "net_time",
    "5km",
    "10km",
    "15km",
    "20km",
    "13.1mi",
    "25km",
    "30km",
    "35km",
    "40km",
    "minutes_per_mile",
    "age_graded_time",
    "age_graded_pct",
];

/// One finisher's row from the results table. All fields are kept textual;
/// the archive's formatting (times, paces, percentages) is preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResultRecord {
    pub first_name: String,
    pub last_name: String,
    pub sex_age: String,
    pub bib: String,
    pub team: String,
    pub country: String,
    pub country_abbrev: String,
    pub place: String,
    pub place_gender: String,
    pub place_age: String,
    pub gun_time: String,
    pub net_time: String,
    pub split_5km: String,
    pub split_10km: String,
    pub split_15km: String,
    pub split_20km: String,
    pub split_half: String,
    pub split_25km: String,
    pub split_30km: String,
    pub split_35km: String,
    pub split_40km: String,
    pub minutes_per_mile: String,
    pub age_graded_time: String,
    pub age_graded_pct: String,
}

impl ResultRecord {
    /// Map cell values onto the schema in column order. Rows shorter than
    /// the schema leave the trailing fields empty; surplus cells are
    /// ignored.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut record = Self::default();
        for (slot, cell) in record.fields_mut().into_iter().zip(cells) {
            *slot = cell;
        }
        record
    }

    /// Field values in schema order, aligned with [`FIELD_NAMES`].
    pub fn to_row(&self) -> Vec<String> {
        self.fields().into_iter().cloned().collect()
    }

    /// True when every field is empty (e.g. a decorative table row).
    pub fn is_blank(&self) -> bool {
        self.fields().into_iter().all(|field| field.is_empty())
    }

    fn fields(&self) -> [&String; FIELD_COUNT] {
        [
            &self.first_name,
            &self.last_name,
            &self.sex_age,
            &self.bib,
            &self.team,
            &self.country,
            &self.country_abbrev,
            &self.place,
            &self.place_gender,
            &self.place_age,
            &self.gun_time,
            &self.net_time,
            &self.split_5km,
            &self.split_10km,
            &self.split_15km,
            &self.split_20km,
            &self.split_half,
            &self.split_25km,
            &self.split_30km,
            &self.split_35km,
            &self.split_40km,
            &self.minutes_per_mile,
            &self.age_graded_time,
            &self.age_graded_pct,
        ]
    }

    fn fields_mut(&mut self) -> [&mut String; FIELD_COUNT] {
        [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.sex_age,
            &mut self.bib,
            &mut self.team,
            &mut self.country,
            &mut self.country_abbrev,
            &mut self.place,
            &mut self.place_gender,
            &mut self.place_age,
            &mut self.gun_time,
            &mut self.net_time,
            &mut self.split_5km,
            &mut self.split_10km,
            &mut self.split_15km,
            &mut self.split_20km,
            &mut self.split_half,
            &mut self.split_25km,
            &mut self.split_30km,
            &mut self.split_35km,
            &mut self.split_40km,
            &mut self.minutes_per_mile,
            &mut self.age_graded_time,
            &mut self.age_graded_pct,
        ]
    }
}
