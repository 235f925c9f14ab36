mod reload;

pub use reload::ReloadProvidersUseCase;
