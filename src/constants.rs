// Mount points and DOM wiring used by the web front-end.

// Element the hero mounts into when started automatically
pub const MOUNT_ID: &str = "particle-reveal-hero";
pub const MOUNTED_ATTR: &str = "data-mounted";
// Set to "false" to keep the page's own box styles on auto-mount
pub const RESET_LAYOUT_ATTR: &str = "data-reset-layout";

// Box reset applied to the auto-mounted container so an empty embed fills
// the viewport
pub const CONTAINER_RESET: &[(&str, &str)] = &[
    ("margin", "0"),
    ("padding", "0"),
    ("width", "100%"),
    ("height", "100vh"),
];

// Asset and collaborator attributes on the mount container
pub const LOGO_SRC_ATTR: &str = "data-logo-src";
pub const SECONDARY_SRC_ATTR: &str = "data-secondary-src";
pub const VIDEO_SRC_ATTR: &str = "data-video-src";
pub const BACKGROUND_ID_ATTR: &str = "data-background-id";
pub const CURSOR_ID_ATTR: &str = "data-cursor-id";

// Logical asset keys, matching the content config's lead/trail images
pub const LOGO_KEY: &str = "logo";
pub const SECONDARY_KEY: &str = "secondary";

// Stacking of the canvases created inside the container
pub const OVERLAY_Z_INDEX: &str = "5";
// Filter strategy: the overlay sits under the masked background element
pub const UNDERLAY_Z_INDEX: &str = "0";
pub const MASK_CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;pointer-events:none;opacity:0;z-index:0";
pub const OVERLAY_CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;pointer-events:none";

// HTMLMediaElement.HAVE_CURRENT_DATA
pub const VIDEO_READY_STATE: u16 = 2;
