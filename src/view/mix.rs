use crate::{
    i18n::Translator,
    model::{Collection, MixRecord},
};
use rinja::Template;

/// Field labels shared by the liquid and base forms and listings.
#[derive(Clone)]
pub struct MixLabels {
    pub name: String,
    pub nicotine_type: String,
    pub freebase: String,
    pub salt: String,
    pub nicotine_strength: String,
    pub pg: String,
    pub vg: String,
    pub save: String,
}

impl MixLabels {
    pub fn new(t: Translator<'_>) -> Self {
        Self {
            name: t.t("Mix.name"),
            nicotine_type: t.t("Mix.nicotineType"),
            freebase: t.t("Mix.freebase"),
            salt: t.t("Mix.salt"),
            nicotine_strength: t.t("Mix.nicotineStrength"),
            pg: t.t("Mix.pg"),
            vg: t.t("Mix.vg"),
            save: t.t("Mix.save"),
        }
    }
}

#[derive(Template)]
#[template(path = "components/mix_form.html")]
pub struct MixFormView {
    pub heading: String,
    pub action: &'static str,
    pub labels: MixLabels,
}

impl MixFormView {
    pub fn new(collection: Collection, heading: String, labels: MixLabels) -> Self {
        Self {
            heading,
            action: collection.listing_path(),
            labels,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/mixes.html")]
pub struct Mixes {
    pub title: String,
    pub empty: String,
    pub create: String,
    pub labels: MixLabels,
    pub rows: Vec<MixRow>,
}

/// A stored row with absent values shown as blanks.
pub struct MixRow {
    pub name: String,
    pub nicotine_type: String,
    pub nicotine_strength: String,
    pub pg: String,
    pub vg: String,
}

impl From<MixRecord> for MixRow {
    fn from(record: MixRecord) -> Self {
        let text = |value: Option<String>| value.unwrap_or_default();

        Self {
            name: text(record.name),
            nicotine_type: text(record.nicotine_type),
            nicotine_strength: text(record.nicotine_strength),
            pg: text(record.pg),
            vg: text(record.vg),
        }
    }
}
