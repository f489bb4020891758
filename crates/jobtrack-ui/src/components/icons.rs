use yew::prelude::*;

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum IconVariant {
    #[default]
    Outline,
    Solid,
}

#[derive(Properties, PartialEq)]
pub(crate) struct IconProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub size: Option<u32>,
    #[prop_or_default]
    pub variant: IconVariant,
}

/// Heart outline, filled when the variant is solid.
#[function_component(IconHeart)]
pub(crate) fn icon_heart(props: &IconProps) -> Html {
    let size = props.size.unwrap_or(24).to_string();
    let fill = match props.variant {
        IconVariant::Outline => "none",
        IconVariant::Solid => "currentColor",
    };
    html! {
        <svg
            class={props.class.clone()}
            width={size.clone()}
            height={size}
            viewBox="0 0 24 24"
            fill={fill}
            stroke="currentColor"
            stroke-linecap="round"
            stroke-linejoin="round"
            stroke-width="2"
            aria-hidden="true"
        >
            <path d="M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2c-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z" />
        </svg>
    }
}
