use yew::prelude::*;

use crate::config;

#[derive(Properties, PartialEq)]
pub struct CarnationProps {
    #[prop_or_default]
    pub class: Classes,
    /// Edge length in rem.
    #[prop_or(2.0)]
    pub size: f64,
}

/// Three pulsing rings drawn as a stylized carnation.
#[function_component(Carnation)]
pub fn carnation(props: &CarnationProps) -> Html {
    html! {
        <div
            class={classes!("carnation", props.class.clone())}
            style={format!("width: {0}rem; height: {0}rem;", props.size)}
        >
            <div class="carnation__petal carnation__petal--outer"></div>
            <div class="carnation__petal carnation__petal--middle"></div>
            <div class="carnation__petal carnation__petal--inner"></div>
        </div>
    }
}

/// Placement of one floating particle, all values in `0.0..1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scatter {
    pub left: f64,
    pub top: f64,
    pub delay: f64,
    pub duration: f64,
}

// Low-discrepancy sequences keep the particles spread out without a RNG.
fn fraction(index: usize, step: f64) -> f64 {
    ((index as f64 + 1.0) * step).fract()
}

pub fn scatter(index: usize) -> Scatter {
    Scatter {
        left: fraction(index, 0.618_033_988_75),
        top: fraction(index, 0.754_877_666_25),
        delay: fraction(index, 0.569_840_290_99),
        duration: fraction(index, 0.414_213_562_37),
    }
}

#[function_component(FloatingParticles)]
pub fn floating_particles() -> Html {
    html! {
        <div class="particles">
            { for (0..config::FLOATING_PARTICLES).map(|i| {
                let spot = scatter(i);
                html! {
                    <div
                        key={i}
                        class="particle"
                        style={format!(
                            "left: {:.1}%; top: {:.1}%; \
                             animation-delay: {:.2}s; animation-duration: {:.2}s;",
                            spot.left * 100.0,
                            spot.top * 100.0,
                            spot.delay * 5.0,
                            3.0 + spot.duration * 4.0,
                        )}
                    >
                        <Carnation size={1.0} />
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_stay_on_the_page() {
        for i in 0..config::FLOATING_PARTICLES {
            let spot = scatter(i);
            for value in [spot.left, spot.top, spot.delay, spot.duration] {
                assert!((0.0..1.0).contains(&value));
            }
        }
    }

    #[test]
    fn particles_do_not_stack() {
        let lefts: Vec<f64> = (0..config::FLOATING_PARTICLES).map(|i| scatter(i).left).collect();
        for (i, a) in lefts.iter().enumerate() {
            for b in &lefts[i + 1..] {
                assert!((a - b).abs() > 0.01);
            }
        }
    }
}
