/*!
# Undangan

A personalized wedding invitation page, rendered in Rust.

## Overview

Each guest receives a link such as `/?to=Budi+Santoso`. The page greets them
by name on a cover screen with a rotating photo backdrop, and opens into the
invitation itself: the couple with their rotating portraits, the story
timeline, a photo gallery, a live countdown to the big day, the events,
location and a gift panel with copy-to-clipboard buttons.

## Architecture

### Widgets (always available)
- **countdown**: remaining time until the target instant, split into
  days/hours/minutes/seconds, with the COUNTING and ARRIVED states
- **rotation**: image pools and the wrapping carousel cursor with its
  cross-fade layers
- **clipboard**: copy with fallback behind an injected `PlatformServices`
- **navigation**: bottom section navigation state
- **guest**: guest name from the page URL
- **content**: all text and media of the invitation, loadable from JSON

### Server side (`web` feature)
- **timer**: periodic tokio task with a cancel-on-drop handle
- **widget**: countdown and carousel mounted on a timer
- **page**: handlebars rendering of the cover and main page variants
- **app**: axum routes and static asset serving

### Browser side (`wasm` feature, wasm32 only)
- **browser**: mounts the widgets on the rendered page with `setInterval`,
  and implements `PlatformServices` on top of the DOM

## Routes

- `/` - Cover screen for the guest named in `?to=`
- `/undangan` - Invitation without the cover
- `/api/countdown` - Remaining time as JSON
- `/api/content` - Invitation content as JSON
- `/assets`, `/pkg` - Static files and the wasm bundle
*/

pub mod clipboard;
pub mod content;
pub mod countdown;
pub mod error;
pub mod guest;
pub mod navigation;
pub mod rotation;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod page;
#[cfg(feature = "web")]
pub mod timer;
#[cfg(feature = "web")]
pub mod widget;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod browser;

pub use error::{InvitationError, Result};
