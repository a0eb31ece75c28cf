#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(non_upper_case_globals)]

pub mod environment;
pub mod follower;
pub mod modulator;
pub mod newtonian;
pub mod patch;
pub mod shift_register;
pub mod spring;
pub mod time;
pub mod types;
pub mod wave;

pub use modulator::{
    newtonian, scalar_goal_follower, scalar_spring, shift_register, wave_modulator, Modulator,
    ModulatorKind, Source,
};
