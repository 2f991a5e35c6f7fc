use crate::{
    backend::BackendClient,
    error::LiquidCalcError,
    extract::{RequestClient, Submission},
    i18n::Locale,
    liquidcalc_view,
    model::{Collection, MixForm, MixRecord},
    view::{MixLabels, MixRow, Mixes, Outcome},
    LiquidCalcContext,
};
use axum::extract::State;
use tracing::{error, info};

/// Persist a submitted mix and decide where the client goes next.
///
/// Field values are stored exactly as submitted. Any backend failure sends
/// the client to `/error`.
pub async fn create_mix(
    client: &dyn BackendClient,
    collection: Collection,
    form: MixForm,
) -> Outcome {
    let record = MixRecord::from(form);
    info!("Creating {collection} entry: {record:?}");

    match client.insert(collection, &record).await {
        Ok(()) => Outcome::redirect(collection.listing_path()),
        Err(e) => {
            error!("Failed to insert into {collection}: {e}");
            Outcome::redirect("/error")
        }
    }
}

pub async fn create_liquid(
    RequestClient(client): RequestClient,
    Submission(form): Submission<MixForm>,
) -> Outcome {
    create_mix(client.as_ref(), Collection::Liquids, form).await
}

pub async fn create_base(
    RequestClient(client): RequestClient,
    Submission(form): Submission<MixForm>,
) -> Outcome {
    create_mix(client.as_ref(), Collection::Bases, form).await
}

pub async fn liquids(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    RequestClient(client): RequestClient,
) -> Result<Outcome, LiquidCalcError> {
    list(&context, &locale, client.as_ref(), Collection::Liquids).await
}

pub async fn bases(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    RequestClient(client): RequestClient,
) -> Result<Outcome, LiquidCalcError> {
    list(&context, &locale, client.as_ref(), Collection::Bases).await
}

async fn list(
    context: &LiquidCalcContext,
    locale: &Locale,
    client: &dyn BackendClient,
    collection: Collection,
) -> Result<Outcome, LiquidCalcError> {
    let rows = match client.select(collection).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to list {collection}: {e}");
            return Ok(Outcome::redirect("/error"));
        }
    };

    let t = context.i18n().translator(locale);
    let namespace = match collection {
        Collection::Liquids => "Liquids",
        Collection::Bases => "Bases",
    };
    let title = t.t(&format!("{namespace}.title"));

    liquidcalc_view!(Mixes {
        title: title.clone(),
        empty: t.t(&format!("{namespace}.empty")),
        create: t.t(&format!("{namespace}.create")),
        labels: MixLabels::new(t),
        rows: rows.into_iter().map(MixRow::from).collect(),
    }, {
        "title" => title,
    })
}
