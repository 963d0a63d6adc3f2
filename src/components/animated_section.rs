use yew::prelude::*;

use crate::reveal::{use_reveal, RevealConfig};

#[derive(Properties, PartialEq)]
pub struct AnimatedSectionProps {
    #[prop_or_default]
    pub class: Classes,
    /// Stagger in milliseconds before the fade-in starts.
    #[prop_or_default]
    pub delay: u32,
    #[prop_or_default]
    pub children: Children,
}

/// Fades and lifts its children in the first time they scroll into view.
#[function_component(AnimatedSection)]
pub fn animated_section(props: &AnimatedSectionProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone(), RevealConfig::with_delay(props.delay));

    html! {
        <div
            ref={node}
            class={classes!("reveal", revealed.then(|| "reveal--visible"), props.class.clone())}
            style={format!("transition-delay: {}ms;", props.delay)}
        >
            { for props.children.iter() }
        </div>
    }
}
