/// eng
/// Serialization of an assembled mechanism into the Cantera CTI input
/// format: units directive, ideal_gas phase block, species blocks with
/// NASA/NASA9 thermo and gas_transport data, and one reaction entry per
/// kinetics model variant. Also hosts the end-to-end mechanism conversion
/// driver used by the command line binary.
/// ----------------------------------------------------------------
/// ru
/// Сериализация собранного механизма в формат Cantera CTI: директива
/// единиц, блок фазы ideal_gas, блоки веществ с термоданными NASA/NASA9 и
/// транспортными данными, и по одной записи реакции на каждый вариант
/// кинетической модели. Здесь же находится драйвер полной конвертации
/// механизма, используемый консольной утилитой.
pub mod writer;
