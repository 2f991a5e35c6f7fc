use crate::{
    error::LiquidCalcError,
    i18n::Locale,
    liquidcalc_view,
    model::Collection,
    view::{Calculator, ErrorPage, Home, MixFormView, MixLabels, Outcome},
    LiquidCalcContext,
};
use axum::extract::State;

pub async fn home(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);
    let title = t.t("Home.title");

    liquidcalc_view!(Home {
        title: title.clone(),
        intro: t.t("Home.intro"),
    }, {
        "title" => title,
    })
}

pub async fn calculator(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);
    let title = t.t("Calculator.title");
    let labels = MixLabels::new(t);

    liquidcalc_view!(Calculator {
        title: title.clone(),
        liquid_form: MixFormView::new(
            Collection::Liquids,
            t.t("Calculator.newLiquid"),
            labels.clone(),
        ),
        base_form: MixFormView::new(Collection::Bases, t.t("Calculator.newBase"), labels),
    }, {
        "title" => title,
    })
}

pub async fn error(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);
    let title = t.t("Error.title");

    liquidcalc_view!(ErrorPage {
        title: title.clone(),
        message: t.t("Error.message"),
        back: t.t("Error.back"),
    }, {
        "title" => title,
    })
}

pub async fn not_found() -> Outcome {
    Outcome::NotFound
}
