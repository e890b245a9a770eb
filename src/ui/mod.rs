//! egui rendering: sidebar and top bar (`panels`), the active tab
//! (`tabs`), and the chart and table widgets they draw with.

pub mod panels;
pub mod plot;
pub mod table;
pub mod tabs;
