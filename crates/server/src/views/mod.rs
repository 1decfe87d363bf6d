//! The views a gate can show and the context needed to render them.
//!
//! Every view is fully determined by its variant and the startup
//! configuration, so images can be served by name without request state.

pub mod image;
pub mod markup;
pub mod preview;

use url::Url;

use gate_types::{CastRef, Fid};
use qualification::RequirementKind;

use crate::config::GateConfig;
use crate::gate::ENTER_ACTION;

pub use image::render_image;
pub use markup::render_frame;
pub use preview::render_preview;

/// The states a visitor can see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Entry screen with a single Enter button
    Prompt,
    /// Shown to qualified visitors
    Welcome,
    /// Asks the visitor to complete the required interactions
    CallToAction,
    /// Enter was pressed but the action carried no fid
    MissingFid,
    /// The provider could not answer and the policy is to say so
    Unverified,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Prompt,
        View::Welcome,
        View::CallToAction,
        View::MissingFid,
        View::Unverified,
    ];

    /// Path segment used for the view's image
    pub fn name(&self) -> &'static str {
        match self {
            View::Prompt => "prompt",
            View::Welcome => "welcome",
            View::CallToAction => "call-to-action",
            View::MissingFid => "error",
            View::Unverified => "unverified",
        }
    }

    pub fn from_name(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|view| view.name() == name)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, View::MissingFid | View::Unverified)
    }

    /// Text drawn on the view's image
    pub fn message(&self, context: &ViewContext) -> String {
        match self {
            View::Prompt => "Press Enter".to_string(),
            View::Welcome => "Welcome to the POD!".to_string(),
            View::CallToAction => format!(
                "Please {} to proceed.",
                join_verbs(&context.requirements)
            ),
            View::MissingFid => "Error: No Farcaster ID found.".to_string(),
            View::Unverified => {
                "We couldn't verify your interactions. Please try again.".to_string()
            }
        }
    }

    /// Buttons attached to the view, in display order
    pub fn buttons(&self, context: &ViewContext) -> Vec<FrameButton> {
        match self {
            View::Prompt => vec![FrameButton::post("Enter", ENTER_ACTION)],
            View::Welcome | View::MissingFid => Vec::new(),
            View::CallToAction => {
                let mut buttons = Vec::new();

                let reactions: Vec<RequirementKind> = context
                    .requirements
                    .iter()
                    .copied()
                    .filter(|kind| *kind != RequirementKind::Follow)
                    .collect();
                if !reactions.is_empty() {
                    buttons.push(FrameButton::link(
                        capitalize(&join_verbs(&reactions)),
                        context.cast_url.clone(),
                    ));
                }

                if context.requirements.contains(&RequirementKind::Follow) {
                    match &context.followee_url {
                        Some(profile) => buttons.push(FrameButton::link("Follow", profile.clone())),
                        // Nothing else to link to, so the cast link covers it
                        None => buttons.push(FrameButton::link("Follow", context.cast_url.clone())),
                    }
                }

                buttons.push(FrameButton::post("Check again", ENTER_ACTION));
                buttons
            }
            View::Unverified => vec![FrameButton::post("Try again", ENTER_ACTION)],
        }
    }
}

/// What pressing a button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Post back to the frame with `value` as the next previous-action
    Post { value: String },
    /// Open `target` in the client
    Link { target: Url },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameButton {
    pub label: String,
    pub action: ButtonAction,
}

impl FrameButton {
    pub fn post(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Post {
                value: value.into(),
            },
        }
    }

    pub fn link(label: impl Into<String>, target: Url) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Link { target },
        }
    }

    /// Value carried in frame state; links carry none.
    pub fn value(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Post { value } => Some(value),
            ButtonAction::Link { .. } => None,
        }
    }
}

/// Configuration-derived data every view needs
#[derive(Debug, Clone)]
pub struct ViewContext {
    /// Absolute URL of the frame route (`.../api`)
    pub post_url: Url,
    /// Absolute URL prefix for view images (`.../api/image/`)
    pub image_base: Url,
    /// Deep link to the target cast
    pub cast_url: Url,
    /// Deep link to the followee's profile
    pub followee_url: Option<Url>,
    pub requirements: Vec<RequirementKind>,
}

impl ViewContext {
    pub fn new(
        public_url: &Url,
        cast: &CastRef,
        followee: Option<Fid>,
        requirements: Vec<RequirementKind>,
    ) -> anyhow::Result<Self> {
        let post_url = public_url.join("api")?;
        let image_base = public_url.join("api/image/")?;
        let cast_url = Url::parse(&format!("https://warpcast.com/~/cast/{}", cast))?;
        let followee_url = followee
            .map(|fid| Url::parse(&format!("https://warpcast.com/~/profiles/{}", fid)))
            .transpose()?;

        Ok(Self {
            post_url,
            image_base,
            cast_url,
            followee_url,
            requirements,
        })
    }

    pub fn from_config(config: &GateConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.public_url,
            &config.cast,
            config.followee,
            config.requirements.clone(),
        )
    }

    pub fn image_url(&self, view: View) -> Url {
        // Names are fixed ASCII path segments, joining cannot fail
        self.image_base
            .join(view.name())
            .unwrap_or_else(|_| self.image_base.clone())
    }
}

/// "like", "like and recast", "like, recast, and follow"
pub fn join_verbs(kinds: &[RequirementKind]) -> String {
    let verbs: Vec<&str> = kinds.iter().map(|k| k.verb()).collect();
    match verbs.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// "like, recast, and follow" → "Like, Recast, and Follow"
fn capitalize(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            if word == "and" {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
