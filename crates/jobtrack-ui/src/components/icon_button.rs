use yew::prelude::*;

/// Props for icon-only buttons.
#[derive(Properties, PartialEq)]
pub(crate) struct IconButtonProps {
    /// Accessible label for the button.
    pub aria_label: AttrValue,
    /// Additional CSS classes.
    #[prop_or_default]
    pub class: Classes,
    /// Whether the button is disabled.
    #[prop_or_default]
    pub disabled: bool,
    /// Pressed state for toggle semantics.
    #[prop_or_default]
    pub pressed: bool,
    /// Click handler.
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    /// Icon content.
    #[prop_or_default]
    pub children: Children,
}

#[function_component(IconButton)]
pub(crate) fn icon_button(props: &IconButtonProps) -> Html {
    let pressed = if props.pressed { "true" } else { "false" };
    html! {
        <button
            class={props.class.clone()}
            type="button"
            aria-label={props.aria_label.clone()}
            aria-pressed={pressed}
            aria-busy={props.disabled.then_some("true")}
            onclick={props.onclick.clone()}
            disabled={props.disabled}
        >
            {for props.children.iter()}
        </button>
    }
}
