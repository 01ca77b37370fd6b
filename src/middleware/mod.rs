pub mod password_gate;
