//! Heart-shaped apply/withdraw button.

use jobtrack_api_models::JobId;
use jobtrack_core::{Activation, ApplyToggle, AuthoritativeInput};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::api::ApiCtx;
use crate::components::icon_button::IconButton;
use crate::components::icons::{IconHeart, IconVariant};
use crate::features::apply::logic::ApplyButtonModel;
use crate::services::api::ApiClient;
use crate::services::redirect::LoginRedirect;

type BrowserToggle = ApplyToggle<ApiClient, LoginRedirect>;

/// Props for [`ApplyButton`].
#[derive(Properties, PartialEq)]
pub struct ApplyButtonProps {
    /// Job the button applies to.
    pub job_id: JobId,
    /// Authoritative application value; bump `revision` on every fresh read.
    #[prop_or_default]
    pub application: AuthoritativeInput,
    /// Additional CSS classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Toggle that applies to a job when empty and withdraws the application when filled.
#[function_component(ApplyButton)]
pub fn apply_button(props: &ApplyButtonProps) -> Html {
    let api = use_context::<ApiCtx>().unwrap_or_default();
    let refresh = use_force_update();

    let toggle = {
        let initial = props.application.application.clone();
        use_memo(
            move |(job_id, api): &(JobId, ApiCtx)| -> BrowserToggle {
                ApplyToggle::new(
                    *job_id,
                    initial,
                    api.client.clone(),
                    api.redirect.clone(),
                )
            },
            (props.job_id, api),
        )
    };

    {
        let toggle = toggle.clone();
        let refresh = refresh.clone();
        use_effect_with_deps(
            move |input: &AuthoritativeInput| {
                if toggle.observe(input) {
                    refresh.force_update();
                }
                || ()
            },
            props.application.clone(),
        );
    }

    let onclick = {
        let toggle = toggle.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(pending) = toggle.activate() else {
                return;
            };
            refresh.force_update();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Activation::Settled(_) = pending.await {
                    refresh.force_update();
                }
            });
        })
    };

    let model = ApplyButtonModel::from_snapshot(&toggle.snapshot());
    let variant = if model.icon_filled() {
        IconVariant::Solid
    } else {
        IconVariant::Outline
    };

    html! {
        <IconButton
            class={classes!(model.class_names(), props.class.clone())}
            aria_label={model.label}
            pressed={model.active}
            disabled={model.disabled}
            {onclick}
        >
            <IconHeart class="heart-icon" size={24} {variant} />
        </IconButton>
    }
}
