/// Game tuning parameters for air hockey
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const GOAL_LINE: f32 = 17.6; // |x| past this line is a goal
    pub const TABLE_HALF_HEIGHT: f32 = 14.0;
    pub const RECOVERY_Y: f32 = 16.0; // puck beyond this escaped through a wall
    pub const SERVE_X: f32 = 9.5;
    pub const EDGE_THICKNESS: f32 = 1.0;
    pub const EDGE_DEPTH: f32 = 3.0;

    // Puck
    pub const PUCK_RADIUS: f32 = 0.6;
    pub const PUCK_MASS: f32 = 1.0;
    pub const PUCK_DAMPING: f32 = 0.05;
    pub const PUCK_SPEED_MAX: f32 = 30.0;

    // Paddle
    pub const PADDLE_RADIUS: f32 = 1.0;
    pub const PADDLE_KEY_SPEED: f32 = 6.0; // 0.1 units per frame at 60 Hz
    pub const PADDLE_DRAG_GAIN: f32 = 20.0;
    pub const PADDLE_RESTITUTION: f32 = 0.9;
    pub const PADDLE_BOUND_X: f32 = 16.0;
    pub const PADDLE_BOUND_Y: f32 = 12.0;

    // Puck nudge (arrow keys)
    pub const NUDGE_FORCE: f32 = 10.0;

    // Wall bounce
    pub const BOUNCE_FACTOR: f32 = 0.5; // exit speed relative to incoming speed
    pub const REPEL_SPEED: f32 = 10.0;

    // Match
    pub const WIN_SCORE: u8 = 4;
    pub const RESET_DELAY: f32 = 1.0;

    // Physics
    pub const FIXED_DT: f32 = 0.0166; // ~60 Hz
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
}
