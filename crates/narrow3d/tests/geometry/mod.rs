mod ball_ball_distance;
mod cast_consistency;
mod cast_fault_policy;
mod compound_distance;
mod penetration;
mod shapes;
mod symmetry;
mod triangle_sets;
