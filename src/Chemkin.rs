/// Error types shared by every parsing stage.
pub mod errors;
/// Fortran-style float parsing and fixed-column field extraction, the two
/// lexical primitives everything else is built on.
pub mod fortfloat;
/// eng
/// The module scans Chemkin-format mechanism files section by section
/// (ELEMENTS, SPECIES, THERMO, REACTIONS, TRAN) and assembles them into a
/// validated Mechanism: element list, species arena with thermo/transport
/// data, and indexed reactions each carrying exactly one kinetics model.
/// Several files may be layered through one parser, so a base mechanism can
/// be supplemented by standalone thermo and transport databases.
/// ----------------------------------------------------------------
/// ru
/// Модуль сканирует файлы механизмов в формате Chemkin по секциям
/// (ELEMENTS, SPECIES, THERMO, REACTIONS, TRAN) и собирает их в
/// проверенный Mechanism: список элементов, арена веществ с термо- и
/// транспортными данными и индексированные реакции, каждая ровно с одной
/// кинетической моделью. Через один парсер можно пропустить несколько
/// файлов, дополняя базовый механизм отдельными базами данных.
pub mod mechanism;
/// The closed set of kinetics model variants: Arrhenius, PLOG, Chebyshev,
/// third-body, Lindemann, Troe and SRI falloff.
pub mod kinetics;
/// Reaction entities, the equation parser and the kinetics classifier that
/// resolves the auxiliary keyword lines of a REACTIONS record into exactly
/// one kinetics model.
pub mod reactions;
/// Species entities, the label-interning registry and the fixed-slot
/// elemental composition parser.
pub mod substances;
/// NASA polynomial thermo models plus the legacy 2x7 and NASA9 entry
/// readers.
pub mod thermo;
/// Lennard-Jones transport property entries.
pub mod transport;
/// Unit token resolution for REACTIONS section headers.
pub mod units;
