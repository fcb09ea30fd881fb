use crate::tracing_targets;

tracing_targets! {
    RAYCAST = "raycast",
    VOLUME = "volume",
    CAMERA = "camera",
    SURFACE = "surface",
}
