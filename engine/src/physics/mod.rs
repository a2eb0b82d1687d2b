//! Physics body handles
//!
//! Entities reference bodies owned by an external solver through the
//! handle components defined here.

pub mod components;

pub use components::{
    Physics2D, Physics3D, PhysicsObject2D, PhysicsObject3D, RigidBody2D, RigidBody3D,
};
