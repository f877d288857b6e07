pub mod advanced_dto;
pub mod expert_dto;
pub mod params_dto;
pub mod request_body;
pub mod script_dto;
pub mod simple_dto;
