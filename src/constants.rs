//! Listas fijas del dominio: tipos de recurso, provincias, barrios/partidos
//! y opciones de "a quién ayuda".

pub const TIPOS_RECURSO: &[&str] = &[
    "Comida",
    "Alojamiento",
    "Ropa",
    "Trámites",
    "Institución",
    "Otro",
];

pub const CATEGORIAS_TRAMITE: &[&str] = &[
    "Documentación",
    "Salud",
    "Educación",
    "Trabajo",
    "Vivienda",
    "Legal",
    "Otro",
];

pub const CABA: &str = "Ciudad Autónoma de Buenos Aires";
pub const BUENOS_AIRES: &str = "Buenos Aires";

pub const PROVINCIAS_ARGENTINAS: &[&str] = &[
    CABA,
    BUENOS_AIRES,
    "Catamarca",
    "Chaco",
    "Chubut",
    "Córdoba",
    "Corrientes",
    "Entre Ríos",
    "Formosa",
    "Jujuy",
    "La Pampa",
    "La Rioja",
    "Mendoza",
    "Misiones",
    "Neuquén",
    "Río Negro",
    "Salta",
    "San Juan",
    "San Luis",
    "Santa Cruz",
    "Santa Fe",
    "Santiago del Estero",
    "Tierra del Fuego, Antártida e Islas del Atlántico Sur",
    "Tucumán",
];

pub const BARRIOS_CABA: &[&str] = &[
    "Agronomía",
    "Almagro",
    "Balvanera",
    "Barracas",
    "Belgrano",
    "Boedo",
    "Caballito",
    "Chacarita",
    "Coghlan",
    "Colegiales",
    "Constitución",
    "Flores",
    "Floresta",
    "La Boca",
    "La Paternal",
    "Liniers",
    "Mataderos",
    "Monte Castro",
    "Monserrat",
    "Nueva Pompeya",
    "Núñez",
    "Palermo",
    "Parque Avellaneda",
    "Parque Chacabuco",
    "Parque Chas",
    "Parque Patricios",
    "Puerto Madero",
    "Recoleta",
    "Retiro",
    "Saavedra",
    "San Cristóbal",
    "San Nicolás",
    "San Telmo",
    "Vélez Sarsfield",
    "Versalles",
    "Villa Crespo",
    "Villa del Parque",
    "Villa Devoto",
    "Villa General Mitre",
    "Villa Lugano",
    "Villa Luro",
    "Villa Ortúzar",
    "Villa Pueyrredón",
    "Villa Real",
    "Villa Riachuelo",
    "Villa Santa Rita",
    "Villa Soldati",
    "Villa Urquiza",
];

pub const PARTIDOS_AMBA_BSAS: &[&str] = &[
    "Avellaneda",
    "Lanús",
    "Lomas de Zamora",
    "La Matanza",
    "Morón",
    "Tres de Febrero",
    "San Martín",
    "Vicente López",
    "San Isidro",
    "Quilmes",
    "Berazategui",
    "Florencio Varela",
    "Esteban Echeverría",
    "Ezeiza",
    "Almirante Brown",
    "Presidente Perón",
    "San Vicente",
];

/// Identificadores de las opciones de `aQuienAyuda`. `todos` es excluyente
/// con el resto.
pub const A_QUIEN_AYUDA_OPCIONES: &[&str] = &[
    "todos",
    "hombres",
    "mujeres",
    "menores18",
    "entre18y45",
    "entre45y65",
    "mayores65",
];

/// Lista de barrios/partidos aplicable a una provincia: CABA usa barrios,
/// Buenos Aires usa partidos del AMBA, el resto no tiene selector secundario.
pub fn barrios_para_provincia(provincia: &str) -> &'static [&'static str] {
    match provincia {
        CABA => BARRIOS_CABA,
        BUENOS_AIRES => PARTIDOS_AMBA_BSAS,
        _ => &[],
    }
}

/// Barrio que sobrevive a un cambio de provincia: se conserva sólo si
/// pertenece a la lista de la nueva provincia, en cualquier otro caso se
/// resetea a vacío.
pub fn barrio_vigente(provincia: &str, barrio_previo: &str) -> String {
    let disponibles = barrios_para_provincia(provincia);
    if !disponibles.is_empty() && disponibles.contains(&barrio_previo) {
        barrio_previo.to_string()
    } else {
        String::new()
    }
}
